//! One-pole low-pass used after the waveshaper
//!
//! Tames the harmonics the distortion adds. The coefficient is the
//! impulse-invariant `g = 1 - exp(-2*pi*f/fs)`.

use std::f32::consts::PI;

use crate::{clamp_cutoff, flush_denormal};

/// Single-channel one-pole low-pass
#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    sample_rate: f32,
    g: f32,
    z1: f32,
}

impl OnePoleFilter {
    /// Create a new filter
    ///
    /// Starts with `g = 1` (pass-through) until a frequency is set.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            g: 1.0,
            z1: 0.0,
        }
    }

    /// Adopt a new sample rate and clear the state
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.g = 1.0;
        self.reset();
    }

    /// Clear the filter memory
    pub fn reset(&mut self) {
        self.z1 = 0.0;
    }

    /// Set the cutoff in Hz, clamped to `[20 Hz, 0.49 * fs]`
    pub fn set_frequency(&mut self, frequency: f32) {
        let frequency = clamp_cutoff(frequency, self.sample_rate);
        self.g = 1.0 - (-2.0 * PI * frequency / self.sample_rate).exp();
    }

    /// Current smoothing coefficient
    pub fn coefficient(&self) -> f32 {
        self.g
    }

    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        self.z1 = flush_denormal(self.z1 + self.g * (input - self.z1));
        self.z1
    }
}
