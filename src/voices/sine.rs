//! Sine voice - soft tone with a plucked brightness transient.
//!
//! # How It Works
//!
//! 1. Vibrato LFO scales the phase increment: `1 + depth · sin`
//! 2. Pure sine times the ADSR
//! 3. Tremolo LFO scales the amplitude: `1 − depth · sin`
//! 4. Bandpass whose cutoff falls from 4.3 kHz to 300 Hz over 250 ms
//! 5. Chorus over the finished block
//!
//! The sweep only fires when a note starts from silence. Playing legato over
//! a sounding note leaves both the oscillator phase and the sweep running.

use super::VoiceCore;
use crate::{
    dsp::{
        chorus::Chorus,
        filter::{SVFilter, BUTTERWORTH_Q},
        lfo::Lfo,
        oscillator::sine,
        sweep::LinearSweep,
    },
    params::SynthParams,
};

/// Time for the cutoff sweep to fall from top to base.
pub const SWEEP_SECONDS: f32 = 0.25;
/// Cutoff with the sweep fully decayed.
pub const SWEEP_BASE_HZ: f32 = 300.0;
/// Cutoff added at the top of the sweep.
pub const SWEEP_RANGE_HZ: f32 = 4000.0;

pub struct SineVoice {
    vibrato: Lfo,
    tremolo: Lfo,
    filter: SVFilter,
    sweep: LinearSweep,
    chorus: Chorus,
}

impl SineVoice {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = SVFilter::bandpass(SWEEP_BASE_HZ, sample_rate);
        filter.set_resonance(BUTTERWORTH_Q);

        Self {
            vibrato: Lfo::new(),
            tremolo: Lfo::new(),
            filter,
            sweep: LinearSweep::new(SWEEP_SECONDS, sample_rate),
            chorus: Chorus::new(sample_rate),
        }
    }

    pub fn note_on(&mut self, core: &mut VoiceCore, note: u8, _params: &SynthParams) {
        let from_silence = !core.is_active();
        core.note_on(note);
        if from_silence {
            self.sweep.trigger();
        }
    }

    pub fn render(&mut self, core: &mut VoiceCore, params: &SynthParams, out: &mut [f32]) {
        let sample_rate = core.sample_rate;

        for sample in out.iter_mut() {
            let vibrato = self.vibrato.next_sample(params.vibrato_rate, sample_rate);
            let phase = core
                .osc
                .next_phase_scaled(1.0 + params.vibrato_depth * vibrato);
            let level = core.envelope.next_sample();

            let tremolo =
                1.0 - params.tremolo_depth * self.tremolo.next_sample(params.tremolo_rate, sample_rate);

            let sweep = self.sweep.next_sample();
            self.filter.set_cutoff(SWEEP_BASE_HZ + sweep * SWEEP_RANGE_HZ);

            *sample = self.filter.process_sample(sine(phase) * level * tremolo);
        }

        self.chorus
            .process_block(out, params.sine_chorus_rate, params.sine_chorus_depth);
    }

    pub fn sweep_level(&self) -> f32 {
        self.sweep.level()
    }
}
