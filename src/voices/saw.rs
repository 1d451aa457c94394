//! Saw voice - buzzy, vocal, metallic.
//!
//! # How It Works
//!
//! 1. Raw saw times the ADSR
//! 2. Lowpass swept from 3.6 kHz down to 600 Hz over 250 ms after each note-on
//! 3. Resonant "formant" bandpass (skipped when resonance is 0)
//! 4. Drive into a hard/tanh blended clipper
//! 5. Recursive comb: the comb output, not the dry signal, is fed back
//!
//! When the envelope has finished the voice outputs silence and empties the
//! comb, so the next note starts without the old tail.

use super::VoiceCore;
use crate::{
    dsp::{
        delay::{ms_to_samples, DelayLine},
        distortion::blend_clip,
        filter::{SVFilter, BUTTERWORTH_Q},
        oscillator::saw,
        sweep::LinearSweep,
    },
    params::SynthParams,
};

/// Time for the pre-filter sweep to fall from top to base.
pub const SWEEP_SECONDS: f32 = 0.25;
/// Pre-filter cutoff with the sweep fully decayed.
pub const SWEEP_BASE_HZ: f32 = 600.0;
/// Pre-filter cutoff added at the top of the sweep.
pub const SWEEP_RANGE_HZ: f32 = 3000.0;
/// Comb buffer length; comfortably above the 30 ms maximum comb time.
const COMB_CAPACITY_SECONDS: f32 = 0.05;

pub struct SawVoice {
    sample_rate: f32,
    sweep: LinearSweep,
    tone: SVFilter,
    formant: SVFilter,
    comb: DelayLine,
}

impl SawVoice {
    pub fn new(sample_rate: f32) -> Self {
        let mut tone = SVFilter::lowpass(SWEEP_BASE_HZ, sample_rate);
        tone.set_resonance(BUTTERWORTH_Q);

        Self {
            sample_rate,
            sweep: LinearSweep::new(SWEEP_SECONDS, sample_rate),
            tone,
            formant: SVFilter::bandpass(800.0, sample_rate),
            comb: DelayLine::with_duration(COMB_CAPACITY_SECONDS, sample_rate),
        }
    }

    pub fn note_on(&mut self, core: &mut VoiceCore, note: u8, _params: &SynthParams) {
        core.note_on(note);
        self.sweep.trigger();
    }

    /// Comb delay in samples for the current comb time.
    pub fn comb_delay_samples(&self, params: &SynthParams) -> usize {
        self.comb
            .clamp_delay(ms_to_samples(params.saw_comb_time, self.sample_rate))
    }

    pub fn render(&mut self, core: &mut VoiceCore, params: &SynthParams, out: &mut [f32]) {
        if !core.is_active() {
            out.fill(0.0);
            self.comb.reset();
            return;
        }

        let delay = self.comb_delay_samples(params);
        let feedback = params.saw_comb_feedback;
        let use_formant = params.formant_resonance > 0.0;
        if use_formant {
            self.formant.set_cutoff(params.formant_freq);
            self.formant.set_resonance(params.formant_resonance);
        }

        for sample in out.iter_mut() {
            let phase = core.osc.next_phase();
            let level = core.envelope.next_sample();

            let sweep = self.sweep.next_sample();
            self.tone.set_cutoff(SWEEP_BASE_HZ + sweep * SWEEP_RANGE_HZ);
            let mut x = self.tone.process_sample(saw(phase) * level);

            if use_formant {
                x = self.formant.process_sample(x);
            }

            let shaped = blend_clip(x, params.saw_drive, params.saw_shape);
            *sample = self.comb.process_feedback(shaped, delay, feedback);
        }
    }

    pub fn comb(&self) -> &DelayLine {
        &self.comb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn ten_ms_comb_is_480_samples() {
        let voice = SawVoice::new(SAMPLE_RATE);
        let params = SynthParams {
            saw_comb_time: 10.0,
            ..SynthParams::default()
        };
        assert_eq!(voice.comb_delay_samples(&params), 480);
    }

    #[test]
    fn longest_comb_fits_buffer() {
        let voice = SawVoice::new(SAMPLE_RATE);
        let params = SynthParams {
            saw_comb_time: 30.0,
            ..SynthParams::default()
        };
        assert_eq!(voice.comb_delay_samples(&params), 1440);
        assert!(voice.comb().capacity() > 1440);
    }

    #[test]
    fn inactive_voice_clears_output_and_comb() {
        let mut core = VoiceCore::new(SAMPLE_RATE);
        let mut voice = SawVoice::new(SAMPLE_RATE);
        let params = SynthParams {
            release: 0.01,
            ..SynthParams::default()
        };
        core.apply_params(&params);

        voice.note_on(&mut core, 45, &params);
        let mut out = vec![0.0; 2048];
        voice.render(&mut core, &params, &mut out);
        assert!(out.iter().any(|&s| s.abs() > 0.0));
        assert!(voice.comb().write_pos() > 0);

        core.note_off(45);
        for _ in 0..4 {
            voice.render(&mut core, &params, &mut out);
        }
        assert!(!core.is_active());

        out.fill(1.0);
        voice.render(&mut core, &params, &mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(voice.comb().write_pos(), 0);
    }

    #[test]
    fn zero_resonance_bypasses_formant() {
        let params = SynthParams {
            formant_resonance: 0.0,
            ..SynthParams::default()
        };

        let mut core = VoiceCore::new(SAMPLE_RATE);
        let mut voice = SawVoice::new(SAMPLE_RATE);
        core.apply_params(&params);
        voice.note_on(&mut core, 57, &params);

        let mut out = vec![0.0; 1024];
        voice.render(&mut core, &params, &mut out);
        assert!(out.iter().all(|s| s.is_finite()));
        assert!(out.iter().any(|&s| s.abs() > 1e-4));
    }
}
