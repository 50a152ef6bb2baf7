//! Engine construction settings
//!
//! Fixed for the lifetime of an engine. Per-block settings live in
//! [`ParameterSnapshot`](crate::ParameterSnapshot).

use tracing::debug;

use crate::error::EngineError;

/// Channels the engine will process; any beyond this are passed through
pub const MAX_CHANNELS: usize = 2;

/// Construction-time settings
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Slots in the oscilloscope ring
    pub scope_capacity: usize,
    /// Write one scope point every N samples
    pub scope_decimation: usize,
    /// Pad smoother settle time when gain drops (ms)
    pub pad_attack_ms: f32,
    /// Pad smoother settle time when gain rises (ms)
    pub pad_release_ms: f32,
    /// Channels processed per block (1 or 2)
    pub max_channels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scope_capacity: 256,
            scope_decimation: 8,
            pad_attack_ms: 5.0,
            pad_release_ms: 150.0,
            max_channels: MAX_CHANNELS,
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.scope_capacity == 0 {
            return Err(EngineError::InvalidConfig("scope_capacity must be non-zero"));
        }
        if self.scope_decimation == 0 {
            return Err(EngineError::InvalidConfig("scope_decimation must be non-zero"));
        }
        if !(self.pad_attack_ms.is_finite() && self.pad_attack_ms > 0.0) {
            return Err(EngineError::InvalidConfig("pad_attack_ms must be positive"));
        }
        if !(self.pad_release_ms.is_finite() && self.pad_release_ms > 0.0) {
            return Err(EngineError::InvalidConfig("pad_release_ms must be positive"));
        }
        if !(1..=MAX_CHANNELS).contains(&self.max_channels) {
            return Err(EngineError::InvalidConfig("max_channels must be 1 or 2"));
        }
        debug!(config = ?self, "engine config validated");
        Ok(())
    }
}
