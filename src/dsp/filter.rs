use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type      | passes            | rejects               |
| --------- | ----------------- | --------------------- |
| low-pass  | below cutoff      | above cutoff          |
| band-pass | around cutoff     | above and below       |

Topology-preserving (trapezoidal) state-variable filter. Both responses come
out of the same two integrators, so switching type is free.

  g = tan(pi * fc / fs)     prewarped integrator gain
  k = 1 / Q                 damping; larger Q rings longer
*/

/// Cutoffs are kept inside (MIN_CUTOFF_HZ, NYQUIST_GUARD * fs / 2).
pub const MIN_CUTOFF_HZ: f32 = 10.0;
const NYQUIST_GUARD: f32 = 0.98;
/// Smallest Q accepted; keeps `k` finite.
pub const MIN_RESONANCE: f32 = 0.01;
/// Butterworth Q, the flattest response without a peak.
pub const BUTTERWORTH_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    BandPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    sample_rate: f32,
    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,

    g: f32,
    k: f32,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, sample_rate: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate,
            cutoff_hz: 1000.0,
            resonance: BUTTERWORTH_Q,
            filter_type,
            g: 0.0,
            k: 1.0 / BUTTERWORTH_Q,
        };
        filter.set_cutoff(1000.0);
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::LowPass, sample_rate);
        filter.set_cutoff(cutoff_hz);
        filter
    }

    pub fn bandpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::BandPass, sample_rate);
        filter.set_cutoff(cutoff_hz);
        filter
    }

    #[inline]
    fn compute_g(&self) -> f32 {
        (PI * self.cutoff_hz / self.sample_rate).tan()
    }

    /// Run both responses for one input sample.
    #[inline]
    pub fn tick(&mut self, sample: f32) -> FilterOutputs {
        let g = self.g;
        let k = self.k;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
        }
    }

    /// Filter one sample with the configured response.
    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let outputs = self.tick(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::BandPass => outputs.bandpass,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_cutoff(self.cutoff_hz);
    }

    /// Set the cutoff, clamped to stay positive and below Nyquist.
    pub fn set_cutoff(&mut self, cutoff: f32) {
        let max_cutoff = (0.5 * self.sample_rate * NYQUIST_GUARD).max(MIN_CUTOFF_HZ);
        self.cutoff_hz = cutoff.clamp(MIN_CUTOFF_HZ, max_cutoff);
        self.g = self.compute_g();
    }

    /// Set the resonance as a Q value.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.max(MIN_RESONANCE);
        self.k = 1.0 / self.resonance;
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
}
