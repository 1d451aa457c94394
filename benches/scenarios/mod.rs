//! Scenario benchmarks.
//!
//! A held note rendered through the engine, once per waveform, the way an
//! audio callback drives it.

mod voices;

pub use voices::bench_voices;
