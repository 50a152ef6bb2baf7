//! State Variable Filter (SVF) - the "Color" pre-stage
//!
//! Based on Andrew Simper's (Cytomic) SVF design using
//! trapezoidal integration (topology-preserving transform).
//!
//! State and coefficients are separate values so the tick itself is a pure
//! function of `(state, coefficients, input, mode)`:
//! - `SvfCoefficients`: derived from cutoff, Q and sample rate
//! - `SvfState`: the two integrator accumulators
//! - `StateVariableFilter`: owns one of each for a single channel

use std::f32::consts::PI;

use crate::{clamp_cutoff, flush_denormal};

/// Lowest quality factor reachable from the resonance control
pub const MIN_Q: f32 = 0.5;

/// Q span covered by the resonance control (0.5 .. 10.0)
const Q_RANGE: f32 = 9.5;

/// SVF output selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FilterMode {
    /// Distorts only the lows
    LowPass,
    /// Distorts only the highs
    HighPass,
    /// Focused, resonant distortion
    #[default]
    BandPass,
}

impl FilterMode {
    /// Map a host choice index (0 = LP, 1 = HP, 2 = BP)
    ///
    /// Unknown indices fall back to band-pass.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => FilterMode::LowPass,
            1 => FilterMode::HighPass,
            _ => FilterMode::BandPass,
        }
    }

    /// Host choice index for this mode
    pub fn index(self) -> u8 {
        match self {
            FilterMode::LowPass => 0,
            FilterMode::HighPass => 1,
            FilterMode::BandPass => 2,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterMode::LowPass => "LP",
            FilterMode::HighPass => "HP",
            FilterMode::BandPass => "BP",
        }
    }
}

/// Map the normalized resonance control onto a quality factor
///
/// `Q = 0.5 + control * 9.5`, control clamped to `[0, 1]`.
#[inline]
pub fn resonance_to_q(control: f32) -> f32 {
    let control = if control.is_nan() { 0.0 } else { control.clamp(0.0, 1.0) };
    MIN_Q + control * Q_RANGE
}

/// TPT two-pole coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvfCoefficients {
    pub g: f32,
    pub k: f32,
    pub a1: f32,
    pub a2: f32,
    pub a3: f32,
}

impl SvfCoefficients {
    /// Calculate coefficients using Cytomic's formulas
    ///
    /// `frequency` is clamped to `[20 Hz, 0.49 * sample_rate]`, `q` to at
    /// least `MIN_Q`.
    pub fn design(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let frequency = clamp_cutoff(frequency, sample_rate);
        let q = if q.is_nan() { MIN_Q } else { q.max(MIN_Q) };

        // Prewarp the cutoff frequency
        let g = (PI * frequency / sample_rate).tan();
        let k = 1.0 / q;
        let a1 = 1.0 / (1.0 + g * (g + k));
        let a2 = g * a1;
        let a3 = g * a2;

        Self { g, k, a1, a2, a3 }
    }
}

/// Integrator state for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SvfState {
    pub ic1eq: f32,
    pub ic2eq: f32,
}

impl SvfState {
    /// SVF tick (trapezoidal integration)
    #[inline]
    pub fn tick(&mut self, coeffs: &SvfCoefficients, input: f32, mode: FilterMode) -> f32 {
        let v3 = input - self.ic2eq;
        let v1 = coeffs.a1 * self.ic1eq + coeffs.a2 * v3;
        let v2 = self.ic2eq + coeffs.a2 * self.ic1eq + coeffs.a3 * v3;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        match mode {
            FilterMode::LowPass => v2,
            FilterMode::HighPass => input - coeffs.k * v1 - v2,
            FilterMode::BandPass => v1,
        }
    }

    /// Clear both accumulators
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

/// Single-channel state variable filter
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    sample_rate: f32,
    coeffs: SvfCoefficients,
    state: SvfState,
}

impl StateVariableFilter {
    /// Default cutoff before the first `set_parameters` call
    const DEFAULT_CUTOFF: f32 = 1000.0;

    /// Create a new SVF
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            coeffs: SvfCoefficients::design(Self::DEFAULT_CUTOFF, MIN_Q, sample_rate),
            state: SvfState::default(),
        }
    }

    /// Adopt a new sample rate and clear the state
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.coeffs = SvfCoefficients::design(Self::DEFAULT_CUTOFF, MIN_Q, sample_rate);
        self.reset();
    }

    /// Reset filter state to silence
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Set cutoff (Hz) and resonance control (0.1-1.0, mapped to Q 0.5-10)
    pub fn set_parameters(&mut self, frequency: f32, resonance: f32) {
        self.set_frequency_q(frequency, resonance_to_q(resonance));
    }

    /// Set cutoff (Hz) and quality factor directly
    pub fn set_frequency_q(&mut self, frequency: f32, q: f32) {
        self.coeffs = SvfCoefficients::design(frequency, q, self.sample_rate);
    }

    /// Current coefficients
    pub fn coefficients(&self) -> &SvfCoefficients {
        &self.coeffs
    }

    /// Current integrator state
    pub fn state(&self) -> &SvfState {
        &self.state
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Process a single sample and return the selected output
    #[inline]
    pub fn process_sample(&mut self, input: f32, mode: FilterMode) -> f32 {
        self.state.tick(&self.coeffs, input, mode)
    }

    /// Process a mono buffer in place
    pub fn process_block(&mut self, samples: &mut [f32], mode: FilterMode) {
        for sample in samples.iter_mut() {
            *sample = self.process_sample(*sample, mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_1_SQRT_2;

    const SAMPLE_RATE: f32 = 48000.0;

    /// Steady-state peak of a unit sine after the filter has settled
    fn sine_peak(filter: &mut StateVariableFilter, freq: f32, mode: FilterMode) -> f32 {
        let settle = 4800;
        let measure = 4800;
        let mut peak: f32 = 0.0;
        for i in 0..settle + measure {
            let x = (2.0 * PI * freq * i as f32 / SAMPLE_RATE).sin();
            let y = filter.process_sample(x, mode);
            if i >= settle {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn test_svf_coefficients() {
        let coeffs = SvfCoefficients::design(1000.0, 2.0, SAMPLE_RATE);
        let g = (PI * 1000.0 / SAMPLE_RATE).tan();

        assert_abs_diff_eq!(coeffs.g, g, epsilon = 1e-7);
        assert_abs_diff_eq!(coeffs.k, 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(coeffs.a1, 1.0 / (1.0 + g * (g + 0.5)), epsilon = 1e-7);
        assert_abs_diff_eq!(coeffs.a2, g * coeffs.a1, epsilon = 1e-7);
        assert_abs_diff_eq!(coeffs.a3, g * coeffs.a2, epsilon = 1e-7);
    }

    #[test]
    fn test_svf_frequency_clamping() {
        let low = SvfCoefficients::design(5.0, 1.0, SAMPLE_RATE);
        let floor = SvfCoefficients::design(20.0, 1.0, SAMPLE_RATE);
        assert_eq!(low, floor);

        let high = SvfCoefficients::design(30000.0, 1.0, SAMPLE_RATE);
        let ceiling = SvfCoefficients::design(SAMPLE_RATE * 0.49, 1.0, SAMPLE_RATE);
        assert_eq!(high, ceiling);

        let nan = SvfCoefficients::design(f32::NAN, 1.0, SAMPLE_RATE);
        assert_eq!(nan, floor);
    }

    #[test]
    fn test_resonance_mapping() {
        assert_abs_diff_eq!(resonance_to_q(0.0), 0.5);
        assert_abs_diff_eq!(resonance_to_q(0.5), 5.25);
        assert_abs_diff_eq!(resonance_to_q(1.0), 10.0);
        assert_abs_diff_eq!(resonance_to_q(3.0), 10.0);

        let mut filter = StateVariableFilter::new(SAMPLE_RATE);
        filter.set_parameters(1000.0, 0.5);
        assert_abs_diff_eq!(filter.coefficients().k, 1.0 / 5.25, epsilon = 1e-7);
    }

    #[test]
    fn test_filter_mode_index() {
        for mode in [FilterMode::LowPass, FilterMode::HighPass, FilterMode::BandPass] {
            assert_eq!(FilterMode::from_index(mode.index()), mode);
        }
        assert_eq!(FilterMode::from_index(9), FilterMode::BandPass);
        assert_eq!(FilterMode::default().display_name(), "BP");
    }

    #[test]
    fn test_lowpass_cutoff_is_minus_3db() {
        let mut filter = StateVariableFilter::new(SAMPLE_RATE);
        filter.set_frequency_q(1000.0, FRAC_1_SQRT_2);

        let peak = sine_peak(&mut filter, 1000.0, FilterMode::LowPass);
        assert!(
            (peak - FRAC_1_SQRT_2).abs() < 0.01,
            "Expected -3 dB (0.707) at cutoff, got {}",
            peak
        );
    }

    #[test]
    fn test_lowpass_attenuation_is_monotonic() {
        let signal = 4000.0;
        let mut previous = f32::MAX;

        for cutoff in [3000.0, 2000.0, 1000.0, 500.0, 250.0] {
            let mut filter = StateVariableFilter::new(SAMPLE_RATE);
            filter.set_frequency_q(cutoff, FRAC_1_SQRT_2);
            let peak = sine_peak(&mut filter, signal, FilterMode::LowPass);

            assert!(
                peak < previous,
                "Cutoff {} Hz should attenuate more ({} >= {})",
                cutoff,
                peak,
                previous
            );
            assert!(peak < 1.0);
            previous = peak;
        }
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = StateVariableFilter::new(SAMPLE_RATE);
        filter.set_parameters(200.0, 0.3);

        let mut out = 1.0;
        for _ in 0..9600 {
            out = filter.process_sample(1.0, FilterMode::HighPass);
        }
        assert!(out.abs() < 1e-3, "HP should reject DC, got {}", out);
    }

    #[test]
    fn test_bandpass_rejects_dc_and_highs() {
        let mut filter = StateVariableFilter::new(SAMPLE_RATE);
        filter.set_frequency_q(1000.0, FRAC_1_SQRT_2);
        let center = sine_peak(&mut filter, 1000.0, FilterMode::BandPass);

        filter.reset();
        let high = sine_peak(&mut filter, 15000.0, FilterMode::BandPass);
        assert!(high < center * 0.2, "BP high {} vs center {}", high, center);

        filter.reset();
        let mut dc = 1.0;
        for _ in 0..9600 {
            dc = filter.process_sample(1.0, FilterMode::BandPass);
        }
        assert!(dc.abs() < 1e-3);
    }

    #[test]
    fn test_reset_and_determinism() {
        let mut a = StateVariableFilter::new(SAMPLE_RATE);
        let mut b = StateVariableFilter::new(SAMPLE_RATE);
        a.set_parameters(800.0, 0.7);
        b.set_parameters(800.0, 0.7);

        let input = [0.5, -0.25, 0.9, 0.0, -0.6, 0.3];
        for &x in &input {
            assert_eq!(
                a.process_sample(x, FilterMode::LowPass),
                b.process_sample(x, FilterMode::LowPass)
            );
        }

        a.reset();
        assert_eq!(*a.state(), SvfState::default());
        assert_eq!(a.process_sample(0.0, FilterMode::HighPass), 0.0);
    }

    #[test]
    fn test_state_decays_to_exact_zero() {
        let mut filter = StateVariableFilter::new(SAMPLE_RATE);
        filter.set_parameters(1000.0, 0.5);

        filter.process_sample(1.0, FilterMode::BandPass);
        for _ in 0..48000 {
            filter.process_sample(0.0, FilterMode::BandPass);
        }
        assert_eq!(*filter.state(), SvfState::default());
        assert_eq!(filter.process_sample(0.0, FilterMode::LowPass), 0.0);
    }

    #[test]
    fn test_process_block_matches_per_sample() {
        let mut a = StateVariableFilter::new(SAMPLE_RATE);
        let mut b = a.clone();
        a.set_parameters(2000.0, 0.4);
        b.set_parameters(2000.0, 0.4);

        let mut block = vec![0.1, 0.4, -0.3, 0.8, -0.9];
        let expected: Vec<f32> = block
            .iter()
            .map(|&x| b.process_sample(x, FilterMode::HighPass))
            .collect();
        a.process_block(&mut block, FilterMode::HighPass);
        assert_eq!(block, expected);
    }
}
