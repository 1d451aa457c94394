//! Benchmarks for ADSR envelope generator.

use std::hint::black_box;

use animal_synth::dsp::envelope::Envelope;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up)
        let mut env = Envelope::adsr(SAMPLE_RATE, 1.0, 0.1, 0.7, 0.3);
        env.note_on();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::adsr(SAMPLE_RATE, 0.01, 0.01, 0.7, 0.3);
        env.note_on();
        // Advance past attack/decay
        for _ in 0..2000 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Release phase (ramping down)
        let mut env = Envelope::adsr(SAMPLE_RATE, 0.01, 0.01, 0.7, 3.0);
        env.note_on();
        for _ in 0..2000 {
            env.next_sample();
        }
        env.note_off();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
