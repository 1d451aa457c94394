//! Distortion / Waveshaping
//!
//! A waveshaper pushes each sample through a transfer function after
//! multiplying it by a drive gain:
//!
//!   output = f(input * drive)
//!
//! Low drive keeps the signal in the linear part of f(); high drive forces it
//! into the curved or flat parts and adds harmonics.
//!
//! # Transfer Functions
//!
//! Hard clip:
//!   f(x) = clamp(x, -1, 1)
//!   - Flat tops, buzzy odd harmonics
//!
//! Tanh soft clip:
//!   f(x) = tanh(x)
//!   - Rounded shoulders, warmer saturation
//!
//! The saw voice blends the two with a `shape` control:
//!
//!   f(x) = (1 - shape) * hard(x) + shape * tanh(x)
//!
//!   shape 0.0 = pure hard clip
//!   shape 1.0 = pure tanh
//!
//! # Drive Values
//!
//!   ~1.0 = Clean
//!   2-4  = Warm saturation
//!   5-10 = Obvious distortion

/// Hard clipping at ±1 after applying `drive`.
#[inline]
pub fn hard_clip(sample: f32, drive: f32) -> f32 {
    (sample * drive).clamp(-1.0, 1.0)
}

/// Tanh saturation after applying `drive`.
#[inline]
pub fn tanh_clip(sample: f32, drive: f32) -> f32 {
    (sample * drive).tanh()
}

/// Crossfade between hard and tanh clipping. `shape` is clamped to 0..=1.
#[inline]
pub fn blend_clip(sample: f32, drive: f32, shape: f32) -> f32 {
    let shape = shape.clamp(0.0, 1.0);
    let hard = hard_clip(sample, drive);
    let soft = tanh_clip(sample, drive);
    hard + (soft - hard) * shape
}
