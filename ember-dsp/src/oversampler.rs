//! 4x polyphase oversampler
//!
//! Runs a nonlinearity at four times the host rate and brings the result
//! back down through the same low-pass prototype.
//!
//! Features:
//! - One 32-tap Kaiser-windowed sinc prototype (beta 7, cutoff 0.22 of the
//!   oversampled Nyquist) shared by both directions
//! - Upsampling through the four 8-tap polyphase branches, gain 4 to undo
//!   zero-stuffing
//! - Downsampling once per base sample: the prototype taps run over every
//!   4th slot of the oversampled history, ending at the newest phase
//! - Fixed-size rings, no allocation after construction

use crate::design::kaiser_lowpass;
use crate::error::DesignError;

/// Oversampling factor
pub const OVERSAMPLE_FACTOR: usize = 4;

/// Prototype filter length
pub const FILTER_ORDER: usize = 32;

/// Taps per polyphase branch
const PHASE_TAPS: usize = FILTER_ORDER / OVERSAMPLE_FACTOR;

/// Oversampled history kept for decimation
const DOWN_HISTORY: usize = FILTER_ORDER * OVERSAMPLE_FACTOR;

/// Prototype cutoff as a fraction of the oversampled Nyquist
const CUTOFF: f32 = 0.22;

/// Kaiser window shape
const BETA: f32 = 7.0;

/// Per-channel oversampling state
#[derive(Debug, Clone)]
pub struct Oversampler {
    coeffs: [f32; FILTER_ORDER],
    up_history: [f32; FILTER_ORDER],
    up_pos: usize,
    down_history: [f32; DOWN_HISTORY],
    down_pos: usize,
}

impl Oversampler {
    /// Create an oversampler with the default prototype filter
    pub fn new() -> Result<Self, DesignError> {
        let coeffs = kaiser_lowpass::<FILTER_ORDER>(CUTOFF, BETA)?;
        Ok(Self::with_coefficients(coeffs))
    }

    /// Create an oversampler around an existing prototype
    ///
    /// The taps should sum to 1 for unity pass-band gain.
    pub fn with_coefficients(coeffs: [f32; FILTER_ORDER]) -> Self {
        Self {
            coeffs,
            up_history: [0.0; FILTER_ORDER],
            up_pos: 0,
            down_history: [0.0; DOWN_HISTORY],
            down_pos: 0,
        }
    }

    /// Prototype taps
    pub fn coefficients(&self) -> &[f32; FILTER_ORDER] {
        &self.coeffs
    }

    /// Round-trip group delay in base-rate samples
    ///
    /// The up branch feeding the kept phase delays by
    /// `((ORDER - 1) / 2 - (FACTOR - 1)) / FACTOR` samples, the strided
    /// decimator by `(ORDER - 1) / 2`.
    pub fn group_delay(&self) -> f32 {
        let half = (FILTER_ORDER - 1) as f32 * 0.5;
        let up = (half - (OVERSAMPLE_FACTOR - 1) as f32) / OVERSAMPLE_FACTOR as f32;
        up + half
    }

    /// Group delay rounded to whole base-rate samples
    pub fn latency_samples(&self) -> usize {
        self.group_delay().round() as usize
    }

    /// Clear both histories
    pub fn reset(&mut self) {
        self.up_history.fill(0.0);
        self.down_history.fill(0.0);
        self.up_pos = 0;
        self.down_pos = 0;
    }

    /// Interpolate one base-rate sample into four oversampled ones
    #[inline]
    pub fn upsample(&mut self, input: f32) -> [f32; OVERSAMPLE_FACTOR] {
        self.up_history[self.up_pos] = input * OVERSAMPLE_FACTOR as f32;

        let mut out = [0.0; OVERSAMPLE_FACTOR];
        for (phase, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for tap in 0..PHASE_TAPS {
                let idx = (self.up_pos + FILTER_ORDER - tap) % FILTER_ORDER;
                sum += self.coeffs[tap * OVERSAMPLE_FACTOR + phase] * self.up_history[idx];
            }
            *slot = sum;
        }

        self.up_pos = (self.up_pos + 1) % FILTER_ORDER;
        out
    }

    /// Filter four oversampled samples and decimate back to one
    #[inline]
    pub fn downsample(&mut self, samples: &[f32; OVERSAMPLE_FACTOR]) -> f32 {
        let mut output = 0.0;
        for (phase, &sample) in samples.iter().enumerate() {
            self.down_history[self.down_pos] = sample;

            // Only the last phase survives decimation
            if phase == OVERSAMPLE_FACTOR - 1 {
                output = self.convolve_down(self.down_pos);
            }

            self.down_pos = (self.down_pos + 1) % DOWN_HISTORY;
        }
        output
    }

    /// Prototype taps against every 4th slot, newest at `last`
    #[inline]
    fn convolve_down(&self, last: usize) -> f32 {
        let mut sum = 0.0;
        for (k, &coeff) in self.coeffs.iter().enumerate() {
            let idx = (last + DOWN_HISTORY - k * OVERSAMPLE_FACTOR) % DOWN_HISTORY;
            sum += coeff * self.down_history[idx];
        }
        sum
    }

    /// Run `shaper` on each oversampled point of one base-rate sample
    #[inline]
    pub fn process<F>(&mut self, input: f32, mut shaper: F) -> f32
    where
        F: FnMut(f32) -> f32,
    {
        let mut block = self.upsample(input);
        for sample in block.iter_mut() {
            *sample = shaper(*sample);
        }
        self.downsample(&block)
    }
}
