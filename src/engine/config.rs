use crate::{
    error::{Result, SynthError},
    MAX_BLOCK_SIZE, MIN_SAMPLE_RATE,
};

/// Fixed settings an [`Engine`](super::Engine) is built with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Largest block rendered in one pass; longer buffers are split.
    pub max_block_size: usize,
    /// Interleaved channel count for [`Engine::process_interleaved`](super::Engine::process_interleaved).
    pub output_channels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: MAX_BLOCK_SIZE,
            output_channels: 2,
        }
    }
}

impl EngineConfig {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    pub fn with_output_channels(mut self, output_channels: usize) -> Self {
        self.output_channels = output_channels;
        self
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate < MIN_SAMPLE_RATE {
            return Err(SynthError::InvalidSampleRate(self.sample_rate));
        }

        if !(1..=MAX_BLOCK_SIZE).contains(&self.max_block_size) {
            return Err(SynthError::InvalidBlockSize(self.max_block_size));
        }

        if !(1..=2).contains(&self.output_channels) {
            return Err(SynthError::UnsupportedChannelLayout(self.output_channels));
        }

        Ok(())
    }
}
