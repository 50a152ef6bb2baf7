//! Envelope-based gain compensation
//!
//! Tracks the level going into and coming out of a nonlinear stage and
//! produces the gain that brings the output back to the input level.
//!
//! Features:
//! - Peak envelope followers with 1 ms attack and 100 ms release
//! - Ratio guarded against silent output and clamped to 0.1 .. 5.0
//! - 50 ms smoothing on the applied gain

use crate::smoothing::time_constant_coeff;

const ATTACK_MS: f32 = 1.0;
const RELEASE_MS: f32 = 100.0;
const GAIN_SMOOTH_MS: f32 = 50.0;

/// Output envelope below which the ratio is not computed
const SILENCE_FLOOR: f32 = 1e-6;

const MIN_GAIN: f32 = 0.1;
const MAX_GAIN: f32 = 5.0;

/// Input/output loudness matcher
#[derive(Debug, Clone)]
pub struct GainCompensator {
    attack: f32,
    release: f32,
    gain_smooth: f32,
    input_env: f32,
    output_env: f32,
    gain: f32,
}

impl GainCompensator {
    pub fn new(sample_rate: f32) -> Self {
        let mut comp = Self {
            attack: 1.0,
            release: 1.0,
            gain_smooth: 1.0,
            input_env: 0.0,
            output_env: 0.0,
            gain: 1.0,
        };
        comp.prepare(sample_rate);
        comp
    }

    /// Recompute coefficients for `sample_rate` and clear state
    pub fn prepare(&mut self, sample_rate: f32) {
        self.attack = time_constant_coeff(ATTACK_MS, sample_rate);
        self.release = time_constant_coeff(RELEASE_MS, sample_rate);
        self.gain_smooth = time_constant_coeff(GAIN_SMOOTH_MS, sample_rate);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.input_env = 0.0;
        self.output_env = 0.0;
        self.gain = 1.0;
    }

    #[inline]
    fn follow(env: f32, sample: f32, attack: f32, release: f32) -> f32 {
        let level = sample.abs();
        let coeff = if level > env { attack } else { release };
        env + coeff * (level - env)
    }

    /// Feed one pre-distortion sample
    #[inline]
    pub fn update_input(&mut self, sample: f32) {
        self.input_env = Self::follow(self.input_env, sample, self.attack, self.release);
    }

    /// Feed one post-distortion sample
    #[inline]
    pub fn update_output(&mut self, sample: f32) {
        self.output_env = Self::follow(self.output_env, sample, self.attack, self.release);
    }

    /// Feed matching input and output blocks
    pub fn process_envelopes(&mut self, input: &[f32], output: &[f32]) {
        for (&x, &y) in input.iter().zip(output.iter()) {
            self.update_input(x);
            self.update_output(y);
        }
    }

    /// Advance the smoothed compensation gain and return it
    pub fn gain_reduction(&mut self) -> f32 {
        let target = if self.output_env > SILENCE_FLOOR {
            (self.input_env / self.output_env).clamp(MIN_GAIN, MAX_GAIN)
        } else {
            1.0
        };
        self.gain += self.gain_smooth * (target - self.gain);
        self.gain
    }

    /// Scale a sample by the current gain
    #[inline]
    pub fn apply(&self, sample: f32) -> f32 {
        sample * self.gain
    }

    pub fn input_level(&self) -> f32 {
        self.input_env
    }

    pub fn output_level(&self) -> f32 {
        self.output_env
    }

    pub fn current_gain(&self) -> f32 {
        self.gain
    }
}
