//! Per-channel signal chain
//!
//! Color SVF -> oversampled waveshaper -> one-pole post filter. Pad, trim and
//! the wet/dry mix are applied by the engine since they are shared across
//! channels.

use ember_dsp::{shape, FilterMode, OnePoleFilter, Oversampler, StateVariableFilter, Waveshaper};

use crate::error::EngineError;
use crate::params::ParameterSnapshot;

/// Chain settings resolved once per block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSettings {
    pub color_hz: f32,
    pub resonance: f32,
    pub mode: FilterMode,
    /// Linear drive including the stage multiplier
    pub drive_gain: f32,
    pub post_filter_hz: f32,
}

impl BlockSettings {
    /// Resolve a (sanitized) snapshot
    pub fn from_snapshot(params: &ParameterSnapshot) -> Self {
        Self {
            color_hz: params.color_hz,
            resonance: params.input_q,
            mode: params.filter_mode,
            drive_gain: Waveshaper::drive_gain(params.drive_db, params.stage_multiplier()),
            post_filter_hz: params.post_filter_hz,
        }
    }
}

/// One channel's filters and oversampler state
#[derive(Debug, Clone)]
pub struct ChannelPipeline {
    svf: StateVariableFilter,
    oversampler: Oversampler,
    post: OnePoleFilter,
}

impl ChannelPipeline {
    pub fn new(sample_rate: f32) -> Result<Self, EngineError> {
        Ok(Self {
            svf: StateVariableFilter::new(sample_rate),
            oversampler: Oversampler::new()?,
            post: OnePoleFilter::new(sample_rate),
        })
    }

    /// Adopt a new sample rate and clear all state
    pub fn prepare(&mut self, sample_rate: f32) {
        self.svf.prepare(sample_rate);
        self.post.prepare(sample_rate);
        self.oversampler.reset();
    }

    /// Silence all state, keeping coefficients
    pub fn reset(&mut self) {
        self.svf.reset();
        self.post.reset();
        self.oversampler.reset();
    }

    /// Recompute coefficients for this block
    pub fn configure(&mut self, settings: &BlockSettings) {
        self.svf.set_parameters(settings.color_hz, settings.resonance);
        self.post.set_frequency(settings.post_filter_hz);
    }

    /// Wet signal for one sample, before pad and trim
    #[inline]
    pub fn process_sample(&mut self, input: f32, settings: &BlockSettings) -> f32 {
        let colored = self.svf.process_sample(input, settings.mode);
        let drive = settings.drive_gain;
        let shaped = self.oversampler.process(colored, |x| shape(x * drive));
        self.post.process_sample(shaped)
    }

    pub fn latency_samples(&self) -> usize {
        self.oversampler.latency_samples()
    }
}
