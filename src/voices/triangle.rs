//! Triangle voice - chirpy, sliding, echoing.
//!
//! # How It Works
//!
//! 1. Glide: every note-on starts `triGlideDepth` semitones below the target
//!    and slides the frequency (not the phase increment) up linearly. The
//!    slide scales this voice's phase step only; the shared oscillator keeps
//!    the note's own increment
//! 2. Raw triangle times the ADSR
//! 3. Chirp AM: `1 − depth · sin(2π · chirpPhase)`
//! 4. Echo with the feedback path scaled by the live envelope
//!
//! ```text
//!   delayed = echo.read(d)
//!   out     = (1 − mix) · dry + mix · delayed · env
//!   echo   <= dry + delayed · 0.4 · env
//! ```
//!
//! When the envelope has finished the voice outputs silence and empties the
//! echo line.

use super::VoiceCore;
use crate::{
    dsp::{
        delay::{ms_to_samples, DelayLine},
        lfo::Lfo,
        oscillator::triangle,
    },
    params::SynthParams,
};

/// Echo feedback scalar applied on top of the envelope.
pub const ECHO_FEEDBACK: f32 = 0.4;
/// Echo buffer length; above the 250 ms maximum echo time.
const ECHO_CAPACITY_SECONDS: f32 = 0.5;

/// Linear frequency ramp from a start to a target over a whole number of
/// samples. The last step lands exactly on the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glide {
    current: f32,
    target: f32,
    step: f32,
    samples_left: u32,
    active: bool,
}

impl Glide {
    /// Begin a slide to `target` from `depth_semitones` below it, lasting
    /// `time_seconds`. A zero-length glide jumps straight to the target.
    pub fn start(&mut self, target: f32, depth_semitones: f32, time_seconds: f32, sample_rate: f32) {
        let start = target * (-depth_semitones / 12.0).exp2();
        let samples = (time_seconds * sample_rate).round().max(0.0) as u32;

        self.target = target;
        self.samples_left = samples;
        self.active = true;

        if samples == 0 {
            self.current = target;
            self.step = 0.0;
        } else {
            self.current = start;
            self.step = (target - start) / samples as f32;
        }
    }

    /// Frequency for this sample, then advance toward the target.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let frequency = self.current;

        if self.samples_left > 0 {
            self.samples_left -= 1;
            if self.samples_left == 0 {
                self.current = self.target;
            } else {
                self.current += self.step;
            }
        } else {
            self.active = false;
        }

        frequency
    }

    /// Stop sliding and sit on the target.
    pub fn cancel(&mut self) {
        self.current = self.target;
        self.samples_left = 0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn samples_left(&self) -> u32 {
        self.samples_left
    }
}

pub struct TriangleVoice {
    sample_rate: f32,
    glide: Glide,
    frequency: f32,
    chirp: Lfo,
    echo: DelayLine,
}

impl TriangleVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            glide: Glide::default(),
            frequency: 0.0,
            chirp: Lfo::new(),
            echo: DelayLine::with_duration(ECHO_CAPACITY_SECONDS, sample_rate),
        }
    }

    pub fn note_on(&mut self, core: &mut VoiceCore, note: u8, params: &SynthParams) {
        core.note_on(note);
        self.glide.start(
            core.frequency(),
            params.tri_glide_depth,
            params.tri_glide_time,
            self.sample_rate,
        );
        self.frequency = self.glide.current();
    }

    pub fn render(&mut self, core: &mut VoiceCore, params: &SynthParams, out: &mut [f32]) {
        if !core.is_active() {
            out.fill(0.0);
            self.echo.reset();
            return;
        }

        let sample_rate = self.sample_rate;
        let delay = self
            .echo
            .clamp_delay(ms_to_samples(params.tri_echo_time, sample_rate));
        let mix = params.tri_echo_mix;

        // A note started by another chain has no slide of its own.
        if self.glide.is_active() && self.glide.target() != core.frequency() {
            self.glide.cancel();
        }

        for sample in out.iter_mut() {
            self.frequency = if self.glide.is_active() {
                self.glide.next()
            } else {
                core.frequency()
            };

            let phase = core.osc.next_phase_scaled(self.frequency / core.frequency());
            let level = core.envelope.next_sample();
            let chirp =
                1.0 - params.tri_chirp_depth * self.chirp.next_sample(params.tri_chirp_rate, sample_rate);

            let dry = triangle(phase) * level * chirp;
            let delayed = self.echo.read(delay);

            *sample = (1.0 - mix) * dry + mix * delayed * level;
            self.echo.write(dry + delayed * ECHO_FEEDBACK * level);
        }
    }

    /// Frequency of the most recently rendered sample.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Frequency the glide will produce next.
    pub fn glide_frequency(&self) -> f32 {
        self.glide.current()
    }

    pub fn glide_samples_left(&self) -> u32 {
        self.glide.samples_left()
    }

    pub fn echo(&self) -> &DelayLine {
        &self.echo
    }
}
