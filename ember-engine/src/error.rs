//! Engine error types

use ember_dsp::DesignError;
use thiserror::Error;

/// Lowest sample rate the engine accepts (Hz)
pub const MIN_SAMPLE_RATE: f32 = 8_000.0;

/// Highest sample rate the engine accepts (Hz)
pub const MAX_SAMPLE_RATE: f32 = 768_000.0;

/// Errors raised while building or preparing the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("sample rate {0} Hz is outside the supported range")]
    InvalidSampleRate(f32),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("oversampling filter design failed: {0}")]
    Design(#[from] DesignError),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

/// Check a host sample rate before anything is allocated for it
pub fn validate_sample_rate(sample_rate: f32) -> Result<f32, EngineError> {
    if sample_rate.is_finite() && (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        Ok(sample_rate)
    } else {
        Err(EngineError::InvalidSampleRate(sample_rate))
    }
}
