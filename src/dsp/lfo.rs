//! Sine LFOs for pitch, amplitude, and delay-time modulation.

use std::f32::consts::TAU;

/*
Low Frequency Oscillators
=========================

An LFO is the same phase accumulator as an audio oscillator, run at
control rate (roughly 0.1 - 50 Hz) and read as a modulation signal instead
of as sound.

    vibrato   increment *= 1 + depth · sin(2π·φ)    pitch wobble
    tremolo   amplitude *= 1 − depth · sin(2π·φ)    volume wobble
    chirp     same shape as tremolo, pushed up toward audio rate (20-50 Hz)
              where it stops sounding like a wobble and starts adding
              sidebands
    chorus    delay time follows the LFO

All of them are free-running: note-on never resets an LFO phase, so the
modulation picks up wherever it was.

Rate is read per sample so a parameter change lands on the next sample
without a jump in phase.
*/

#[derive(Debug, Clone, Copy, Default)]
pub struct Lfo {
    phase: f32,
}

impl Lfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bipolar sine at the current phase, then advance by `rate_hz`.
    #[inline]
    pub fn next_sample(&mut self, rate_hz: f32, sample_rate: f32) -> f32 {
        let value = (TAU * self.phase).sin();
        self.phase += rate_hz / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
