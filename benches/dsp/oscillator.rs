//! Benchmarks for phase accumulator and waveform evaluation.

use std::hint::black_box;

use animal_synth::dsp::oscillator::{PhaseOscillator, Waveform};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in Waveform::ALL {
            let mut osc = PhaseOscillator::new();
            osc.set_frequency(440.0, SAMPLE_RATE);

            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = waveform.evaluate(osc.next_phase());
                    }
                    black_box(&buffer);
                })
            });
        }

        // Vibrato path - increment scaled every sample
        let mut osc = PhaseOscillator::new();
        osc.set_frequency(440.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("sine_scaled", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let scale = 1.0 + 0.01 * (i as f32 * 0.01).sin();
                    *sample = Waveform::Sine.evaluate(osc.next_phase_scaled(black_box(scale)));
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
