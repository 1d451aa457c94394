//! Benchmarks for waveshaping distortion.

use std::hint::black_box;

use animal_synth::dsp::distortion;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sine-like values)
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut buffer = input.clone();

        // Hard clip - clamp only
        group.bench_with_input(BenchmarkId::new("hard_clip", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = distortion::hard_clip(x, black_box(4.0));
                }
            })
        });

        // Soft clip - tanh per sample
        group.bench_with_input(BenchmarkId::new("tanh_clip", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = distortion::tanh_clip(x, black_box(4.0));
                }
            })
        });

        // Blend - both shapes every sample, as the saw voice runs it
        group.bench_with_input(BenchmarkId::new("blend_clip", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = distortion::blend_clip(x, black_box(4.0), black_box(0.5));
                }
            })
        });
    }

    group.finish();
}
