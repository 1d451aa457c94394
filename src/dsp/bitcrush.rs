//! Bitcrusher: sample-rate reduction plus bit-depth reduction.
//!
//! Every `hold_interval` samples the input is captured, rounded to one of
//! `2^bits - 1` steps, and then held until the next capture. In between the
//! output does not move, which is what gives the stepped, aliased sound.

/// Bit depth is rounded and kept inside this range.
pub const MIN_BIT_DEPTH: f32 = 1.0;
pub const MAX_BIT_DEPTH: f32 = 16.0;

/// Samples between captures for a target crush rate (at least 1).
#[inline]
pub fn hold_interval(sample_rate: f32, crush_rate: f32) -> usize {
    ((sample_rate / crush_rate.max(1.0)) as usize).max(1)
}

/// Number of quantization steps for a bit depth: `2^bits - 1`.
#[inline]
pub fn quantization_levels(bit_depth: f32) -> f32 {
    let bits = bit_depth.round().clamp(MIN_BIT_DEPTH, MAX_BIT_DEPTH);
    bits.exp2() - 1.0
}

/// Round `sample` to the nearest of `levels` steps per unit.
#[inline]
pub fn quantize(sample: f32, levels: f32) -> f32 {
    let levels = f64::from(levels);
    ((f64::from(sample) * levels).round() / levels) as f32
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bitcrusher {
    counter: usize,
    held: f32,
}

impl Bitcrusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture and requantize when the hold counter is at 0, otherwise
    /// repeat the held sample.
    #[inline]
    pub fn process(&mut self, sample: f32, interval: usize, levels: f32) -> f32 {
        if self.counter == 0 {
            self.held = quantize(sample, levels);
        }

        self.counter += 1;
        if self.counter >= interval {
            self.counter = 0;
        }

        self.held
    }

    pub fn reset(&mut self) {
        self.counter = 0;
        self.held = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_at_least_one() {
        assert_eq!(hold_interval(48_000.0, 8_000.0), 6);
        assert_eq!(hold_interval(48_000.0, 96_000.0), 1);
    }

    #[test]
    fn bit_depth_is_rounded_and_clamped() {
        assert_eq!(quantization_levels(16.0), 65_535.0);
        assert_eq!(quantization_levels(40.0), 65_535.0);
        assert_eq!(quantization_levels(0.0), 1.0);
        assert_eq!(quantization_levels(3.4), 7.0);
    }

    #[test]
    fn sixteen_bit_error_is_within_half_step() {
        let levels = quantization_levels(16.0);
        let bound = 0.5 / 65_535.0 + f32::EPSILON;

        for i in -1000..=1000 {
            let x = i as f32 / 1000.0 * 0.987_654;
            let err = (quantize(x, levels) - x).abs();
            assert!(err <= bound, "error {} exceeds {} at {}", err, bound, x);
        }
    }

    #[test]
    fn held_sample_only_changes_on_wrap() {
        let mut crusher = Bitcrusher::new();
        let levels = quantization_levels(16.0);
        let input: Vec<f32> = (0..12).map(|i| i as f32 * 0.05).collect();

        let output: Vec<f32> = input
            .iter()
            .map(|&x| crusher.process(x, 4, levels))
            .collect();

        assert!(output[0..4].iter().all(|&s| s == output[0]));
        assert!(output[4..8].iter().all(|&s| s == output[4]));
        assert!((output[4] - input[4]).abs() < 1e-4);
        assert!((output[8] - input[8]).abs() < 1e-4);
    }

    #[test]
    fn one_bit_snaps_to_extremes() {
        let levels = quantization_levels(1.0);
        assert_eq!(quantize(0.7, levels), 1.0);
        assert_eq!(quantize(-0.7, levels), -1.0);
        assert_eq!(quantize(0.2, levels), 0.0);
    }
}
