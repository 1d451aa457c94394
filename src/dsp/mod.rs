//! Low-level DSP primitives used by the voices.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to embed directly inside voice structs. Buffers are sized
//! when the sample rate is known and never grow afterwards.

/// Sample-and-hold plus bit-depth reduction.
pub mod bitcrush;
/// Block-level modulated-delay chorus.
pub mod chorus;
/// Circular delay line for comb and echo effects.
pub mod delay;
/// Drive and hard/tanh waveshaping.
pub mod distortion;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter with lowpass and bandpass responses.
pub mod filter;
/// Free-running sine LFO.
pub mod lfo;
/// Phase accumulator and raw waveforms.
pub mod oscillator;
/// One-shot sweep and punch envelopes.
pub mod sweep;

pub use envelope::EnvelopeState;
pub use oscillator::Waveform;
