/*
Engine
======

One monophonic voice, four possible chains. Each call to a process method:

  1. reads the waveform selector and envelope settings from the snapshot
  2. drains every pending note message, in arrival order
  3. renders the active chain into the scratch buffer, at most
     `max_block_size` frames at a time
  4. copies the mono result into every output channel
  5. hands each chunk to the scope tap, if one is attached, and one
     DisplayFrame once the whole block is done

Nothing on this path allocates, locks, or logs. Configuration (construction
and `prepare`) is the only place buffers are sized and the only place that
can fail.
*/

pub mod config;

use tracing::debug;

use crate::{
    dsp::{EnvelopeState, Waveform},
    error::Result,
    params::SynthParams,
    scope::{DisplayFrame, ScopeTap},
    synth::message::{MessageReceiver, SynthMessage},
    voices::{SawVoice, SineVoice, SquareVoice, TriangleVoice, VoiceCore},
};

use self::config::EngineConfig;

/// All mutable DSP state, owned in one place.
pub struct EngineState {
    core: VoiceCore,
    sine: SineVoice,
    saw: SawVoice,
    square: SquareVoice,
    triangle: TriangleVoice,
}

impl EngineState {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            core: VoiceCore::new(sample_rate),
            sine: SineVoice::new(sample_rate),
            saw: SawVoice::new(sample_rate),
            square: SquareVoice::new(sample_rate),
            triangle: TriangleVoice::new(sample_rate),
        }
    }

    fn note_on(&mut self, waveform: Waveform, note: u8, params: &SynthParams) {
        let core = &mut self.core;
        match waveform {
            Waveform::Sine => self.sine.note_on(core, note, params),
            Waveform::Saw => self.saw.note_on(core, note, params),
            Waveform::Square => self.square.note_on(core, note, params),
            Waveform::Triangle => self.triangle.note_on(core, note, params),
        }
    }

    fn render(&mut self, waveform: Waveform, params: &SynthParams, out: &mut [f32]) {
        let core = &mut self.core;
        match waveform {
            Waveform::Sine => self.sine.render(core, params, out),
            Waveform::Saw => self.saw.render(core, params, out),
            Waveform::Square => self.square.render(core, params, out),
            Waveform::Triangle => self.triangle.render(core, params, out),
        }
    }

    pub fn core(&self) -> &VoiceCore {
        &self.core
    }

    pub fn saw(&self) -> &SawVoice {
        &self.saw
    }

    pub fn square(&self) -> &SquareVoice {
        &self.square
    }

    pub fn triangle(&self) -> &TriangleVoice {
        &self.triangle
    }
}

pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    scratch: Vec<f32>,
    scope: Option<ScopeTap>,
    waveform: Waveform,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            output_channels = config.output_channels,
            "engine created"
        );

        Ok(Self {
            config,
            state: EngineState::new(config.sample_rate),
            scratch: vec![0.0; config.max_block_size],
            scope: None,
            waveform: Waveform::default(),
        })
    }

    /// Attach the display channel.
    pub fn with_scope(mut self, tap: ScopeTap) -> Self {
        self.scope = Some(tap);
        self
    }

    pub fn set_scope(&mut self, tap: Option<ScopeTap>) {
        self.scope = tap;
    }

    /// Rebuild every buffer and filter for a new sample rate or block size.
    /// Any sounding note is dropped.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<()> {
        let config = EngineConfig {
            sample_rate,
            max_block_size,
            ..self.config
        };
        config.validate()?;

        debug!(sample_rate, max_block_size, "engine prepared");

        self.config = config;
        self.state = EngineState::new(sample_rate);
        self.scratch = vec![0.0; max_block_size];
        Ok(())
    }

    /// Apply one note message immediately.
    pub fn handle_message(&mut self, message: SynthMessage, params: &SynthParams) {
        match message {
            SynthMessage::NoteOn { note, velocity: 0 } => {
                self.state.core.note_off(note);
            }
            SynthMessage::NoteOn { note, .. } => {
                self.state.note_on(params.waveform, note, params);
            }
            SynthMessage::NoteOff { note, .. } => {
                self.state.core.note_off(note);
            }
            SynthMessage::AllNotesOff => self.state.core.release_all(),
        }
    }

    fn begin_block(&mut self, params: &SynthParams, messages: &mut impl MessageReceiver) {
        self.waveform = params.waveform;
        self.state.core.apply_params(params);

        while let Some(message) = messages.pop() {
            self.handle_message(message, params);
        }
    }

    /// Render one chunk into the scratch buffer and feed its samples to the scope.
    fn render_chunk(&mut self, params: &SynthParams, frames: usize) {
        let block = &mut self.scratch[..frames];
        self.state.render(self.waveform, params, block);

        if let Some(tap) = self.scope.as_mut() {
            tap.push_samples(block);
        }
    }

    fn end_block(&mut self) {
        if let Some(tap) = self.scope.as_mut() {
            tap.push_frame(DisplayFrame {
                envelope_level: self.state.core.envelope().level(),
                note: self.state.core.held_note(),
                waveform: self.waveform,
            });
        }
    }

    /// Render planar output. Every channel receives the same mono signal;
    /// the frame count is that of the shortest channel.
    pub fn process_block(
        &mut self,
        params: &SynthParams,
        messages: &mut impl MessageReceiver,
        outputs: &mut [&mut [f32]],
    ) {
        self.begin_block(params, messages);

        let frames = outputs.iter().map(|ch| ch.len()).min().unwrap_or(0);
        let mut offset = 0;

        while offset < frames {
            let n = (frames - offset).min(self.config.max_block_size);
            self.render_chunk(params, n);

            let block = &self.scratch[..n];
            for channel in outputs.iter_mut() {
                channel[offset..offset + n].copy_from_slice(block);
            }

            offset += n;
        }

        self.end_block();
    }

    /// Render into an interleaved buffer of `channels` channels, as handed
    /// out by audio device callbacks.
    pub fn process_interleaved(
        &mut self,
        params: &SynthParams,
        messages: &mut impl MessageReceiver,
        data: &mut [f32],
        channels: usize,
    ) {
        self.begin_block(params, messages);

        if channels == 0 {
            self.end_block();
            return;
        }

        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let n = (total_frames - frames_written).min(self.config.max_block_size);
            self.render_chunk(params, n);

            let out = &mut data[frames_written * channels..(frames_written + n) * channels];
            for (frame, &sample) in out.chunks_exact_mut(channels).zip(&self.scratch[..n]) {
                frame.fill(sample);
            }

            frames_written += n;
        }

        self.end_block();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Waveform used for the most recent block.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn envelope_state(&self) -> EnvelopeState {
        self.state.core.envelope().state()
    }

    pub fn envelope_level(&self) -> f32 {
        self.state.core.envelope().level()
    }

    pub fn held_note(&self) -> Option<u8> {
        self.state.core.held_note()
    }

    pub fn is_active(&self) -> bool {
        self.state.core.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::message::NoMessages;

    struct Queue(Vec<SynthMessage>);

    impl MessageReceiver for Queue {
        fn pop(&mut self) -> Option<SynthMessage> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    fn engine(max_block_size: usize) -> Engine {
        Engine::new(EngineConfig::default().with_max_block_size(max_block_size)).unwrap()
    }

    #[test]
    fn messages_apply_in_arrival_order() {
        let mut engine = engine(256);
        let params = SynthParams::default();
        let mut queue = Queue(vec![
            SynthMessage::NoteOn { note: 60, velocity: 100 },
            SynthMessage::NoteOn { note: 64, velocity: 100 },
            SynthMessage::NoteOff { note: 60, velocity: 0 },
        ]);

        let mut out = vec![0.0; 64];
        engine.process_block(&params, &mut queue, &mut [&mut out[..]]);

        assert_eq!(engine.held_note(), Some(64));
        assert_eq!(engine.envelope_state(), EnvelopeState::Attack);
    }

    #[test]
    fn zero_velocity_note_on_releases() {
        let mut engine = engine(256);
        let params = SynthParams::default();
        engine.handle_message(SynthMessage::NoteOn { note: 60, velocity: 90 }, &params);
        engine.handle_message(SynthMessage::NoteOn { note: 60, velocity: 0 }, &params);

        assert_eq!(engine.envelope_state(), EnvelopeState::Release);
        assert_eq!(engine.held_note(), None);
    }

    #[test]
    fn chunked_render_matches_single_pass() {
        let params = SynthParams {
            waveform: Waveform::Saw,
            ..SynthParams::default()
        };
        let note = SynthMessage::NoteOn { note: 57, velocity: 100 };

        let mut whole = engine(2048);
        let mut a = vec![0.0; 1000];
        whole.process_block(&params, &mut Queue(vec![note]), &mut [&mut a[..]]);

        let mut chunked = engine(64);
        let mut b = vec![0.0; 1000];
        chunked.process_block(&params, &mut Queue(vec![note]), &mut [&mut b[..]]);

        assert_eq!(a, b);
    }

    #[test]
    fn interleaved_duplicates_into_each_channel() {
        let mut engine = engine(128);
        let params = SynthParams {
            waveform: Waveform::Square,
            ..SynthParams::default()
        };
        engine.handle_message(SynthMessage::NoteOn { note: 69, velocity: 100 }, &params);

        let mut data = vec![0.0; 300 * 2];
        engine.process_interleaved(&params, &mut NoMessages, &mut data, 2);

        for frame in data.chunks_exact(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn one_display_frame_per_processed_block() {
        let (tap, mut reader) = crate::scope::channel_with_window(8192, 3000);
        let mut engine = engine(1024).with_scope(tap);
        let params = SynthParams::default();
        let mut queue = Queue(vec![SynthMessage::NoteOn { note: 60, velocity: 100 }]);

        let mut out = vec![0.0; 3000];
        engine.process_block(&params, &mut queue, &mut [&mut out[..]]);
        reader.poll();

        assert_eq!(reader.frames_received(), 1);
        assert_eq!(reader.window(), &out[..]);
        assert_eq!(reader.latest().envelope_level, engine.envelope_level());

        let mut data = vec![0.0; 2500 * 2];
        engine.process_interleaved(&params, &mut NoMessages, &mut data, 2);
        reader.poll();
        assert_eq!(reader.frames_received(), 2);
    }

    #[test]
    fn prepare_rejects_bad_rate_and_keeps_config() {
        let mut engine = engine(256);
        assert!(engine.prepare(0.0, 256).is_err());
        assert!(engine.prepare(8_000.0, 256).is_err());
        assert_eq!(engine.sample_rate(), 48_000.0);

        engine.prepare(44_100.0, 512).unwrap();
        assert_eq!(engine.sample_rate(), 44_100.0);
        assert_eq!(engine.config().max_block_size, 512);
    }
}
