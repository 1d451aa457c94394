pub mod dsp;
pub mod engine; // Block dispatch and engine-wide state
pub mod error;
pub mod io;
pub mod params; // Parameter schema and snapshots
pub mod scope; // Engine -> display channel
pub mod synth; // Note messages and monophonic tracking
pub mod voices; // The four character voices

pub use engine::{config::EngineConfig, Engine};
pub use error::SynthError;
pub use params::{ParamId, SynthParams};

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Lowest supported sample rate. Keeps the top MIDI note's phase step
/// (12.5 kHz, plus vibrato) well under one cycle per sample.
pub const MIN_SAMPLE_RATE: f32 = 22_050.0;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
