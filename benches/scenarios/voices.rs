//! Benchmarks for complete voice chains.
//!
//! Each waveform's chain rendered through the engine with a held A2 and
//! default parameters, exactly as an audio callback would drive it.

use std::hint::black_box;

use animal_synth::{
    dsp::Waveform,
    synth::message::{NoMessages, SynthMessage},
    Engine, EngineConfig, SynthParams,
};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        for waveform in Waveform::ALL {
            let params = SynthParams {
                waveform,
                ..SynthParams::default()
            };
            let Ok(mut engine) = Engine::new(EngineConfig::new(SAMPLE_RATE)) else {
                continue;
            };
            engine.handle_message(SynthMessage::NoteOn { note: 45, velocity: 100 }, &params);

            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    engine.process_block(
                        black_box(&params),
                        &mut NoMessages,
                        &mut [&mut left[..], &mut right[..]],
                    );
                })
            });
        }

        // Interleaved stereo, as handed out by cpal
        let params = SynthParams {
            waveform: Waveform::Triangle,
            ..SynthParams::default()
        };
        if let Ok(mut engine) = Engine::new(EngineConfig::new(SAMPLE_RATE)) {
            engine.handle_message(SynthMessage::NoteOn { note: 45, velocity: 100 }, &params);
            let mut data = vec![0.0f32; size * 2];
            group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |b, _| {
                b.iter(|| {
                    engine.process_interleaved(black_box(&params), &mut NoMessages, &mut data, 2);
                })
            });
        }
    }

    group.finish();
}
