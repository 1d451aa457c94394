//! Benchmarks for delay line operations.

use std::hint::black_box;

use animal_synth::dsp::{
    chorus::Chorus,
    delay::{ms_to_samples, DelayLine},
};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Comb times (ms) spanning the saw voice's range
    let comb_times: &[f32] = &[1.0, 10.0, 30.0];

    for &size in BLOCK_SIZES {
        // Generate a test signal
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &ms in comb_times {
            let delay_samples = ms_to_samples(ms, SAMPLE_RATE);
            let mut delay = DelayLine::with_duration(0.05, SAMPLE_RATE);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("comb_{}ms", ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for (out, &x) in buffer.iter_mut().zip(&input) {
                            *out = delay.process_feedback(x, black_box(delay_samples), 0.25);
                        }
                    })
                },
            );
        }

        // Interpolated read (fractional delay - used in chorus)
        let mut delay = DelayLine::with_duration(0.03, SAMPLE_RATE);
        for &sample in &input {
            delay.write(sample);
        }
        group.bench_with_input(BenchmarkId::new("read_interpolated", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    // Simulate modulated delay time (chorus-like)
                    let delay_time = 336.0 + (i as f32 * 0.1).sin() * 48.0;
                    sum += delay.read_interpolated(black_box(delay_time));
                }
                sum
            })
        });

        // Whole chorus block
        let mut chorus = Chorus::new(SAMPLE_RATE);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("chorus", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chorus.process_block(black_box(&mut buffer), 1.5, 0.3);
            })
        });
    }

    group.finish();
}
