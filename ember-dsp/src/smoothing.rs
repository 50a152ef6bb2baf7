//! Gain smoothing
//!
//! Features:
//! - `settle_coeff`: one-pole coefficient that covers 99% of a step in the
//!   given time
//! - `time_constant_coeff`: classic `1 - e^(-1/tau)` increment for envelope
//!   followers
//! - `PadSmoother`: asymmetric attack/release gain used to pad the wet
//!   signal down as the stage multiplier rises

use tracing::debug;

use crate::flush_denormal;

/// `ln(100)`: a one-pole reaches 99% of a step after `ln(100)` time constants
const SETTLE_LOG: f32 = 4.605_170_2;

/// Multipliers at or below this are treated as unity by the pad target
const MIN_MULTIPLIER: f32 = 1e-6;

/// Pole for a smoother that settles (to within 1%) in `time_ms`
///
/// Returns 0 (instant) for non-positive or non-finite times.
#[inline]
pub fn settle_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    let samples = time_ms * 0.001 * sample_rate;
    if !samples.is_finite() || samples <= 0.0 {
        return 0.0;
    }
    (-SETTLE_LOG / samples).exp()
}

/// Per-sample increment for a one-pole follower with time constant `time_ms`
///
/// Used as `env += coeff * (target - env)`. Returns 1 (instant) for
/// non-positive or non-finite times.
#[inline]
pub fn time_constant_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    let samples = time_ms * 0.001 * sample_rate;
    if !samples.is_finite() || samples <= 0.0 {
        return 1.0;
    }
    1.0 - (-1.0 / samples).exp()
}

/// Pad gain the smoother should head toward
#[inline]
pub fn target_gain(multiplier: f32, pad_enabled: bool) -> f32 {
    if pad_enabled && multiplier > MIN_MULTIPLIER {
        1.0 / multiplier
    } else {
        1.0
    }
}

/// Asymmetric one-pole gain smoother
///
/// Falls toward a lower target with the attack pole and rises toward a
/// higher one with the release pole.
#[derive(Debug, Clone)]
pub struct PadSmoother {
    attack_ms: f32,
    release_ms: f32,
    attack: f32,
    release: f32,
    current: f32,
}

impl PadSmoother {
    pub fn new(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut smoother = Self {
            attack_ms,
            release_ms,
            attack: 0.0,
            release: 0.0,
            current: 1.0,
        };
        smoother.prepare(sample_rate);
        smoother
    }

    /// Recompute both poles for `sample_rate` and restart at unity
    pub fn prepare(&mut self, sample_rate: f32) {
        self.attack = settle_coeff(self.attack_ms, sample_rate);
        self.release = settle_coeff(self.release_ms, sample_rate);
        self.current = 1.0;
        debug!(
            sample_rate,
            attack = self.attack,
            release = self.release,
            "pad smoother prepared"
        );
    }

    /// Jump back to unity gain
    pub fn reset(&mut self) {
        self.current = 1.0;
    }

    /// Advance one sample toward `target`
    #[inline]
    pub fn next(&mut self, target: f32) -> f32 {
        let coeff = if target < self.current {
            self.attack
        } else {
            self.release
        };
        self.current = flush_denormal(self.current * coeff + target * (1.0 - coeff));
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }
}
