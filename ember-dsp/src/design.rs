//! Windowed-sinc FIR design
//!
//! Compute-once routines used to build the oversampler's prototype
//! low-pass. Math runs in f64 and is rounded to f32 taps at the end.
//! Nothing here is called from the audio thread.

use std::f64::consts::PI;

use tracing::debug;

use crate::error::DesignError;

/// Upper bound on series terms for the Bessel approximation
const BESSEL_MAX_TERMS: usize = 25;

/// Stop the series once a term drops below this fraction of the sum
const BESSEL_TOLERANCE: f64 = 1e-10;

/// Smallest tap sum accepted before normalization
const MIN_KERNEL_SUM: f64 = 1e-9;

/// Modified Bessel function of the first kind, order 0
///
/// Truncated power series: `I0(x) = sum_k ((x/2)^k / k!)^2`.
pub fn bessel_i0(x: f64) -> f64 {
    let half_sq = (x * 0.5) * (x * 0.5);
    let mut sum = 1.0;
    let mut term = 1.0;

    for k in 1..BESSEL_MAX_TERMS {
        let k = k as f64;
        term *= half_sq / (k * k);
        sum += term;
        if term < BESSEL_TOLERANCE * sum {
            break;
        }
    }

    sum
}

/// Kaiser window value at `index` for a window of `len` points
pub fn kaiser_window(index: usize, len: usize, beta: f64) -> f64 {
    if len < 2 {
        return 1.0;
    }
    let ratio = 2.0 * index as f64 / (len - 1) as f64 - 1.0;
    let arg = (1.0 - ratio * ratio).max(0.0);
    bessel_i0(beta * arg.sqrt()) / bessel_i0(beta)
}

/// Design an `N`-tap Kaiser-windowed sinc low-pass
///
/// `cutoff` is a fraction of Nyquist in `(0, 1)`. The kernel is centered on
/// `(N - 1) / 2` (linear phase) and normalized so the taps sum to 1.
pub fn kaiser_lowpass<const N: usize>(cutoff: f32, beta: f32) -> Result<[f32; N], DesignError> {
    if !cutoff.is_finite() || cutoff <= 0.0 || cutoff >= 1.0 {
        return Err(DesignError::InvalidCutoff(cutoff));
    }
    if !beta.is_finite() || beta < 0.0 {
        return Err(DesignError::InvalidBeta(beta));
    }

    let fc = cutoff as f64;
    let beta = beta as f64;
    let center = (N as f64 - 1.0) * 0.5;

    let mut kernel = [0.0f64; N];
    for (i, tap) in kernel.iter_mut().enumerate() {
        let n = i as f64 - center;
        let sinc = if n.abs() < 1e-9 {
            fc
        } else {
            (PI * fc * n).sin() / (PI * n)
        };
        *tap = sinc * kaiser_window(i, N, beta);
    }

    let sum: f64 = kernel.iter().sum();
    if !sum.is_finite() || sum.abs() < MIN_KERNEL_SUM {
        return Err(DesignError::DegenerateKernel);
    }

    let mut taps = [0.0f32; N];
    for (out, tap) in taps.iter_mut().zip(kernel.iter()) {
        *out = (tap / sum) as f32;
    }

    debug!(taps = N, cutoff = fc, beta, "designed Kaiser low-pass");
    Ok(taps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bessel_i0_known_values() {
        assert_eq!(bessel_i0(0.0), 1.0);
        assert_abs_diff_eq!(bessel_i0(1.0), 1.266_065_877_752, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_i0(7.0), 168.593_908_510_3, epsilon = 1e-6);
    }

    #[test]
    fn test_kaiser_window_shape() {
        let len = 32;
        let beta = 7.0;
        let edge = 1.0 / bessel_i0(beta);

        assert_abs_diff_eq!(kaiser_window(0, len, beta), edge, epsilon = 1e-12);
        assert_abs_diff_eq!(kaiser_window(len - 1, len, beta), edge, epsilon = 1e-12);

        for i in 0..len {
            let mirrored = kaiser_window(len - 1 - i, len, beta);
            assert_abs_diff_eq!(kaiser_window(i, len, beta), mirrored, epsilon = 1e-12);
        }

        // Rises toward the middle
        assert!(kaiser_window(15, len, beta) > kaiser_window(8, len, beta));
        assert!(kaiser_window(8, len, beta) > kaiser_window(1, len, beta));
    }

    #[test]
    fn test_lowpass_unity_dc_and_symmetry() {
        let taps = kaiser_lowpass::<32>(0.22, 7.0).unwrap();

        let sum: f32 = taps.iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-5);

        for i in 0..32 {
            assert_abs_diff_eq!(taps[i], taps[31 - i], epsilon = 1e-7);
        }

        // Center taps dominate
        let max = taps.iter().cloned().fold(f32::MIN, f32::max);
        assert_abs_diff_eq!(max, taps[15], epsilon = 1e-6);
    }

    #[test]
    fn test_lowpass_rejects_bad_arguments() {
        assert_eq!(
            kaiser_lowpass::<32>(0.0, 7.0),
            Err(DesignError::InvalidCutoff(0.0))
        );
        assert_eq!(
            kaiser_lowpass::<32>(1.5, 7.0),
            Err(DesignError::InvalidCutoff(1.5))
        );
        assert!(matches!(
            kaiser_lowpass::<32>(f32::NAN, 7.0),
            Err(DesignError::InvalidCutoff(_))
        ));
        assert_eq!(
            kaiser_lowpass::<32>(0.22, -1.0),
            Err(DesignError::InvalidBeta(-1.0))
        );
        assert_eq!(
            kaiser_lowpass::<0>(0.22, 7.0),
            Err(DesignError::DegenerateKernel)
        );
    }
}
