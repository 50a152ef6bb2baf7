//! Asymmetric waveshaper
//!
//! The positive half-wave follows a tube-style exponential curve,
//! `1 - e^(-x)`, which saturates toward +1. The negative half-wave uses
//! `x / (1 + x^2)`, which folds back toward zero past `x = -1` and never
//! drops below -0.5. The mismatch between the halves is what produces the
//! even harmonics.
//!
//! The shaper is stateless: it has no memory and no sample rate.

/// Convert decibels to linear gain
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Apply the transfer curve to an already-driven sample
#[inline]
pub fn shape(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 - (-x).exp()
    } else {
        x / (1.0 + x * x)
    }
}

/// Stateless drive + transfer curve
#[derive(Debug, Clone, Copy, Default)]
pub struct Waveshaper;

impl Waveshaper {
    pub fn new() -> Self {
        Self
    }

    /// Linear gain for a drive setting and stage multiplier
    #[inline]
    pub fn drive_gain(drive_db: f32, multiplier: f32) -> f32 {
        db_to_gain(drive_db) * multiplier
    }

    /// Drive `input` by `drive_db` and `multiplier`, then shape it
    #[inline]
    pub fn process_sample(&self, input: f32, drive_db: f32, multiplier: f32) -> f32 {
        shape(input * Self::drive_gain(drive_db, multiplier))
    }

    /// Drive and shape a buffer in place
    pub fn process_block(&self, samples: &mut [f32], drive_db: f32, multiplier: f32) {
        let gain = Self::drive_gain(drive_db, multiplier);
        for sample in samples.iter_mut() {
            *sample = shape(*sample * gain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_maps_to_zero() {
        let shaper = Waveshaper::new();
        assert_eq!(shape(0.0), 0.0);
        assert_eq!(shaper.process_sample(0.0, 40.0, 100.0), 0.0);
    }

    #[test]
    fn test_known_points() {
        assert_abs_diff_eq!(shape(1.0), 0.632_120_6, epsilon = 1e-6);
        assert_abs_diff_eq!(shape(-1.0), -0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(shape(-2.0), -0.4, epsilon = 1e-7);
    }

    #[test]
    fn test_positive_branch_saturates() {
        let mut previous = 0.0;
        for i in 1..=200 {
            let y = shape(i as f32 * 0.05);
            assert!(y > previous, "curve must rise at x = {}", i as f32 * 0.05);
            assert!(y <= 1.0);
            previous = y;
        }
        assert!(shape(1000.0) <= 1.0);
    }

    #[test]
    fn test_negative_branch_is_bounded() {
        for i in 1..=1000 {
            let y = shape(-(i as f32) * 0.1);
            assert!((-0.5..0.0).contains(&y), "shape({}) = {}", -(i as f32) * 0.1, y);
        }
    }

    #[test]
    fn test_drive_gain() {
        assert_abs_diff_eq!(db_to_gain(0.0), 1.0);
        assert_abs_diff_eq!(db_to_gain(20.0), 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(db_to_gain(-6.0), 0.501_187, epsilon = 1e-5);
        assert_abs_diff_eq!(Waveshaper::drive_gain(20.0, 5.0), 50.0, epsilon = 1e-4);

        let shaper = Waveshaper::new();
        assert_abs_diff_eq!(
            shaper.process_sample(0.1, 20.0, 1.0),
            shape(1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_process_block() {
        let shaper = Waveshaper::new();
        let mut block = [0.5, -0.5, 0.0];
        shaper.process_block(&mut block, 0.0, 2.0);
        assert_abs_diff_eq!(block[0], shape(1.0), epsilon = 1e-7);
        assert_abs_diff_eq!(block[1], -0.5, epsilon = 1e-7);
        assert_eq!(block[2], 0.0);
    }
}
