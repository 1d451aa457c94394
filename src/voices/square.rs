//! Square voice - punchy, lo-fi, barking.
//!
//! # How It Works
//!
//! 1. Raw square times the ADSR
//! 2. Punch: gain starts at 2.0 on note-on and decays exponentially to 1.0
//! 3. Bitcrusher (sample-and-hold plus requantize) on every sample
//! 4. "Bark" bandpass whose cutoff falls by 2 kHz over 150 ms after note-on
//!
//! ```text
//!   gain
//!   2.0 ┤█
//!       │ ▀▄
//!       │   ▀▀▄▄
//!   1.0 ┤       ▀▀▀▀▀▀▀▀▀▀▀▀
//!       └──────────────────── t
//!        τ = squarePunchDecay
//! ```

use super::VoiceCore;
use crate::{
    dsp::{
        bitcrush::{hold_interval, quantization_levels, Bitcrusher},
        filter::SVFilter,
        oscillator::square,
        sweep::{LinearSweep, Punch},
    },
    params::SynthParams,
};

/// Time for the bark sweep to fall from top to base.
pub const BARK_SWEEP_SECONDS: f32 = 0.15;
/// Bark cutoff added above `barkFilterFreq` at the top of the sweep.
pub const BARK_SWEEP_RANGE_HZ: f32 = 2000.0;

pub struct SquareVoice {
    sample_rate: f32,
    punch: Punch,
    crusher: Bitcrusher,
    bark: SVFilter,
    bark_sweep: LinearSweep,
}

impl SquareVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            punch: Punch::new(sample_rate),
            crusher: Bitcrusher::new(),
            bark: SVFilter::bandpass(800.0, sample_rate),
            bark_sweep: LinearSweep::new(BARK_SWEEP_SECONDS, sample_rate),
        }
    }

    pub fn note_on(&mut self, core: &mut VoiceCore, note: u8, _params: &SynthParams) {
        core.note_on(note);
        self.punch.trigger();
        self.bark_sweep.trigger();
    }

    pub fn render(&mut self, core: &mut VoiceCore, params: &SynthParams, out: &mut [f32]) {
        let punch_coeff = self.punch.coefficient(params.square_punch_decay);
        let interval = hold_interval(self.sample_rate, params.square_bitcrush_rate);
        let levels = quantization_levels(params.square_bitcrush_depth);

        self.bark.set_resonance(params.bark_filter_resonance);

        for sample in out.iter_mut() {
            let phase = core.osc.next_phase();
            let level = core.envelope.next_sample();

            let boosted = square(phase) * level * self.punch.next_gain(punch_coeff);
            let x = self.crusher.process(boosted, interval, levels);

            let sweep = self.bark_sweep.next_sample();
            self.bark
                .set_cutoff(params.bark_filter_freq + sweep * BARK_SWEEP_RANGE_HZ);

            *sample = self.bark.process_sample(x);
        }
    }

    /// Gain the punch transient will apply to the next sample.
    pub fn punch_gain(&self) -> f32 {
        1.0 + self.punch.level()
    }
}
