use thiserror::Error;

/// Configuration-time failures. The per-block processing path never fails.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid sample rate: {0} Hz (must be finite and at least {min} Hz)", min = crate::MIN_SAMPLE_RATE)]
    InvalidSampleRate(f32),

    #[error("invalid block size: {0} (must be 1..={max})", max = crate::MAX_BLOCK_SIZE)]
    InvalidBlockSize(usize),

    #[error("unsupported channel layout: {0} channels (mono or stereo only)")]
    UnsupportedChannelLayout(usize),

    #[cfg(feature = "serde")]
    #[error("failed to parse preset: {0}")]
    Preset(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SynthError>;
