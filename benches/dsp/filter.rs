//! Benchmarks for state-variable filter.

use std::hint::black_box;

use animal_synth::dsp::filter::SVFilter;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Lowpass filter, fixed cutoff
        let mut filter = SVFilter::lowpass(1000.0, SAMPLE_RATE);
        filter.set_resonance(1.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Bandpass filter, fixed cutoff
        let mut filter = SVFilter::bandpass(1000.0, SAMPLE_RATE);
        filter.set_resonance(1.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Swept cutoff - one tan() per sample, as the voices run it
        let mut filter = SVFilter::bandpass(1000.0, SAMPLE_RATE);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass_swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, (out, &x)) in buffer.iter_mut().zip(&input).enumerate() {
                    filter.set_cutoff(300.0 + i as f32 * 4.0);
                    *out = filter.process_sample(black_box(x));
                }
            })
        });
    }

    group.finish();
}
