//! One-shot modulation envelopes fired by note-on.
//!
//! These sit beside the main ADSR and never gate the voice. `LinearSweep`
//! falls from 1.0 to 0.0 over a fixed window and drives filter cutoffs;
//! `Punch` decays exponentially and drives a transient gain boost.

/// Linear 1.0 → 0.0 ramp over a fixed window.
pub struct LinearSweep {
    level: f32,
    step: f32,
}

impl LinearSweep {
    /// A sweep that takes `window_seconds` to fall from 1.0 to 0.0.
    pub fn new(window_seconds: f32, sample_rate: f32) -> Self {
        Self {
            level: 0.0,
            step: 1.0 / (window_seconds * sample_rate).max(1.0),
        }
    }

    pub fn trigger(&mut self) {
        self.level = 1.0;
    }

    /// Return the current level, then step toward zero.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let current = self.level;
        self.level = (self.level - self.step).max(0.0);
        current
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

/// Exponential transient: jumps to 1.0 on trigger and decays toward 0.0
/// with a time constant given per block.
pub struct Punch {
    level: f32,
    sample_rate: f32,
}

impl Punch {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            level: 0.0,
            sample_rate,
        }
    }

    pub fn trigger(&mut self) {
        self.level = 1.0;
    }

    /// Per-sample multiplier for a decay time constant in seconds.
    #[inline]
    pub fn coefficient(&self, decay_seconds: f32) -> f32 {
        (-1.0 / (decay_seconds.max(crate::MIN_TIME) * self.sample_rate)).exp()
    }

    /// Gain for this sample (`1 + level`), then decay the level by `coefficient`.
    #[inline]
    pub fn next_gain(&mut self, coefficient: f32) -> f32 {
        let gain = 1.0 + self.level;
        self.level *= coefficient;
        gain
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}
