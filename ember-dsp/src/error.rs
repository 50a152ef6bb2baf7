//! Errors raised while designing filter tables

use thiserror::Error;

/// FIR design errors
///
/// Only produced at construction time, never on the audio path.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DesignError {
    #[error("cutoff {0} must lie strictly between 0 and 1 (fraction of Nyquist)")]
    InvalidCutoff(f32),
    #[error("Kaiser beta {0} must be finite and non-negative")]
    InvalidBeta(f32),
    #[error("filter kernel sums to zero or a non-finite value")]
    DegenerateKernel,
}
