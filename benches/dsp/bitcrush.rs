//! Benchmarks for sample-and-hold bitcrushing.

use std::hint::black_box;

use animal_synth::dsp::bitcrush::{hold_interval, quantization_levels, Bitcrusher};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_bitcrush(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bitcrush");

    // (crush rate Hz, bit depth)
    let settings: &[(f32, f32)] = &[(8_000.0, 16.0), (2_000.0, 8.0), (100.0, 1.0)];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut buffer = input.clone();

        for &(rate, bits) in settings {
            let interval = hold_interval(SAMPLE_RATE, rate);
            let levels = quantization_levels(bits);
            let mut crusher = Bitcrusher::new();

            group.bench_with_input(
                BenchmarkId::new(format!("{}hz_{}bit", rate as u32, bits as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for (out, &x) in buffer.iter_mut().zip(&input) {
                            *out = crusher.process(x, black_box(interval), black_box(levels));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}
