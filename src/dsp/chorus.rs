use crate::dsp::{delay::DelayLine, lfo::Lfo};

/*
Chorus Effect
=============

Chorus thickens a sound by mixing the dry signal with a copy whose delay
time is swept by an LFO. The moving delay detunes the copy slightly, which
reads as several voices playing together.

  delay_ms = CENTRE_DELAY_MS + depth · MAX_SWEEP_MS · sin(2π·φ)
  out      = (1 − MIX) · dry + MIX · delayed

Rate (0 - 10 Hz): LFO speed. Slow = shimmer, fast = warble.
Depth (0 - 1): fraction of the maximum sweep. 0 leaves a static 7 ms copy.

The chorus works on a whole rendered block after the voice loop.
*/

/// Centre of the delay sweep.
pub const CENTRE_DELAY_MS: f32 = 7.0;
/// Delay swing at depth 1.0, either side of the centre.
pub const MAX_SWEEP_MS: f32 = 5.0;
/// Fixed dry/wet blend.
pub const MIX: f32 = 0.5;

const CAPACITY_SECONDS: f32 = 0.03;

pub struct Chorus {
    delay_line: DelayLine,
    lfo: Lfo,
    sample_rate: f32,
}

impl Chorus {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            delay_line: DelayLine::with_duration(CAPACITY_SECONDS, sample_rate),
            lfo: Lfo::new(),
            sample_rate,
        }
    }

    pub fn process_block(&mut self, buffer: &mut [f32], rate: f32, depth: f32) {
        let depth = depth.clamp(0.0, 1.0);

        for sample in buffer.iter_mut() {
            let lfo_value = self.lfo.next_sample(rate, self.sample_rate);
            let delay_ms = CENTRE_DELAY_MS + lfo_value * depth * MAX_SWEEP_MS;
            let delay_samples = delay_ms * self.sample_rate / 1000.0;

            let delayed = self.delay_line.read_interpolated(delay_samples);
            self.delay_line.write(*sample);

            *sample = *sample * (1.0 - MIX) + delayed * MIX;
        }
    }

    pub fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chorus_delays_impulse_by_centre_time() {
        let mut chorus = Chorus::new(48_000.0);
        let mut buffer = vec![0.0; 1024];
        buffer[0] = 1.0;

        chorus.process_block(&mut buffer, 1.0, 0.0);

        assert_eq!(buffer[0], 0.5);
        // 7 ms at 48 kHz
        assert!((buffer[336] - 0.5).abs() < 1e-6);
        assert!(buffer[1..336].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_chorus_output_bounded() {
        let mut chorus = Chorus::new(48_000.0);
        let mut buffer: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.1).sin()).collect();

        chorus.process_block(&mut buffer, 2.0, 1.0);

        for sample in &buffer {
            assert!(sample.abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut chorus = Chorus::new(44_100.0);
        let mut buffer = vec![0.0; 512];
        chorus.process_block(&mut buffer, 5.0, 0.7);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
