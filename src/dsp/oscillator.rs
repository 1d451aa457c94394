use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase Accumulator
=================

Every voice reads its raw waveform from one shared phase in [0, 1):

    phase += frequency / sample_rate
    if phase >= 1: phase -= 1

The wrap is a single subtraction, which is only valid while the increment
stays below 1 (frequency below the sample rate). Vibrato and glide change the
increment per sample but never push it near that bound.

Waveforms evaluated at `phase`:

    sine      sin(2π·phase)
    saw       2·phase − 1           ramps up, snaps down
    square    +1 below 0.5, −1 above
    triangle  4·|phase − 0.5| − 1   starts at +1, bottoms out at 0.5

The phase is never reset by note-on, so retriggers stay click-free.
*/

/// Which voice the engine dispatches each block to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Saw,
        Waveform::Square,
        Waveform::Triangle,
    ];

    /// Map a selector index (0..=3) to a waveform. Anything else is Sine.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Saw => "Saw",
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
        }
    }

    /// Evaluate the raw waveform at `phase`.
    #[inline]
    pub fn evaluate(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => sine(phase),
            Waveform::Saw => saw(phase),
            Waveform::Square => square(phase),
            Waveform::Triangle => triangle(phase),
        }
    }
}

#[inline]
pub fn sine(phase: f32) -> f32 {
    (TAU * phase).sin()
}

#[inline]
pub fn saw(phase: f32) -> f32 {
    2.0 * phase - 1.0
}

#[inline]
pub fn square(phase: f32) -> f32 {
    if phase < 0.5 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
pub fn triangle(phase: f32) -> f32 {
    4.0 * (phase - 0.5).abs() - 1.0
}

/// Wrapping phase accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseOscillator {
    phase: f32,
    increment: f32,
}

impl PhaseOscillator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frequency(&mut self, frequency: f32, sample_rate: f32) {
        self.increment = frequency / sample_rate;
    }

    pub fn set_increment(&mut self, increment: f32) {
        self.increment = increment;
    }

    pub fn increment(&self) -> f32 {
        self.increment
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return the current phase and advance by the stored increment.
    #[inline]
    pub fn next_phase(&mut self) -> f32 {
        self.next_phase_scaled(1.0)
    }

    /// Return the current phase and advance by `increment * scale`.
    #[inline]
    pub fn next_phase_scaled(&mut self, scale: f32) -> f32 {
        let current = self.phase;
        self.phase += self.increment * scale;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        current
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
