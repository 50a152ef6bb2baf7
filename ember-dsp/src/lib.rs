//! DSP building blocks for Ember
//!
//! Everything the distortion pipeline runs per sample, with no threads,
//! no allocation and no I/O:
//! - StateVariableFilter: TPT two-pole "Color" pre-filter (LP/HP/BP)
//! - Waveshaper: stateless asymmetric nonlinearity
//! - Oversampler: 4x polyphase FIR wrapper around the waveshaper
//! - OnePoleFilter: post-distortion smoothing
//! - PadSmoother: asymmetric attack/release gain smoothing
//! - GainCompensator: envelope-based loudness matching
//!
//! Filter table design lives in [`design`] and only runs at construction.

pub mod design;
mod compensator;
mod error;
mod one_pole;
mod oversampler;
mod smoothing;
mod svf;
mod waveshaper;

pub use compensator::GainCompensator;
pub use error::DesignError;
pub use one_pole::OnePoleFilter;
pub use oversampler::{Oversampler, OVERSAMPLE_FACTOR, FILTER_ORDER};
pub use smoothing::{settle_coeff, target_gain, time_constant_coeff, PadSmoother};
pub use svf::{resonance_to_q, FilterMode, StateVariableFilter, SvfCoefficients, SvfState, MIN_Q};
pub use waveshaper::{db_to_gain, shape, Waveshaper};

/// Lowest cutoff accepted by the filters (Hz)
pub const MIN_CUTOFF_HZ: f32 = 20.0;

/// Highest cutoff accepted by the filters, as a fraction of the sample rate
pub const MAX_CUTOFF_RATIO: f32 = 0.49;

/// State magnitudes below this are flushed to zero
pub const DENORMAL_THRESHOLD: f32 = 1e-15;

/// Zero out values small enough to decay into subnormals
#[inline]
pub fn flush_denormal(value: f32) -> f32 {
    if value.abs() < DENORMAL_THRESHOLD {
        0.0
    } else {
        value
    }
}

/// Clamp a cutoff to `[20 Hz, 0.49 * sample_rate]`. NaN maps to the floor.
#[inline]
pub(crate) fn clamp_cutoff(frequency: f32, sample_rate: f32) -> f32 {
    let max = (sample_rate * MAX_CUTOFF_RATIO).max(MIN_CUTOFF_HZ);
    if frequency.is_nan() {
        return MIN_CUTOFF_HZ;
    }
    frequency.clamp(MIN_CUTOFF_HZ, max)
}
