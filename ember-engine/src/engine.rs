//! Distortion engine - orchestrates the channel pipelines
//!
//! Owns everything the audio thread touches:
//! - One `ChannelPipeline` per processed channel
//! - The shared pad smoother, advanced once per sample
//! - Scope decimation and per-block metering
//!
//! `process_block` never allocates, locks or logs.

use std::sync::Arc;

use ember_dsp::{db_to_gain, target_gain, PadSmoother};
use tracing::{debug, info};

use crate::config::{EngineConfig, MAX_CHANNELS};
use crate::error::{validate_sample_rate, EngineError};
use crate::meters::MeterReadings;
use crate::monitor::Monitor;
use crate::params::{ParameterSnapshot, Parameters};
use crate::pipeline::{BlockSettings, ChannelPipeline};

/// Real-time distortion processor for up to two channels
#[derive(Debug)]
pub struct DistortionEngine {
    sample_rate: f32,
    config: EngineConfig,
    channels: [ChannelPipeline; MAX_CHANNELS],
    pad: PadSmoother,
    scope_counter: usize,
    monitor: Arc<Monitor>,
}

impl DistortionEngine {
    /// Create an engine ready to process at `sample_rate`
    pub fn new(sample_rate: f32, config: EngineConfig) -> Result<Self, EngineError> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        config.validate()?;

        let channels = [
            ChannelPipeline::new(sample_rate)?,
            ChannelPipeline::new(sample_rate)?,
        ];
        let pad = PadSmoother::new(sample_rate, config.pad_attack_ms, config.pad_release_ms);
        let monitor = Arc::new(Monitor::new(config.scope_capacity));

        let engine = Self {
            sample_rate,
            config,
            channels,
            pad,
            scope_counter: 0,
            monitor,
        };
        info!(
            sample_rate,
            channels = engine.config.max_channels,
            latency = engine.latency_samples(),
            "distortion engine created"
        );
        Ok(engine)
    }

    /// Create an engine with the default configuration
    pub fn with_defaults(sample_rate: f32) -> Result<Self, EngineError> {
        Self::new(sample_rate, EngineConfig::default())
    }

    /// Switch sample rate and clear all state
    pub fn prepare(&mut self, sample_rate: f32) -> Result<(), EngineError> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;
        for channel in self.channels.iter_mut() {
            channel.prepare(sample_rate);
        }
        self.pad.prepare(sample_rate);
        self.scope_counter = 0;
        self.monitor.clear();
        info!(
            sample_rate,
            channels = self.config.max_channels,
            latency = self.latency_samples(),
            "distortion engine prepared"
        );
        Ok(())
    }

    /// Silence all state, keeping the sample rate
    pub fn reset(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.reset();
        }
        self.pad.reset();
        self.scope_counter = 0;
        debug!("distortion engine reset");
    }

    /// Process channel buffers in place
    ///
    /// Only the first `max_channels` buffers are touched and only up to the
    /// length of the shortest one.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]], params: &ParameterSnapshot) {
        let params = params.sanitized();
        let multiplier = params.stage_multiplier();
        let pad_target = target_gain(multiplier, params.pad_enabled);
        let trim = db_to_gain(params.output_trim_db);
        let wet = params.wet();
        let dry = 1.0 - wet;
        let settings = BlockSettings::from_snapshot(&params);

        let active = channels.len().min(self.config.max_channels);
        let buffers = &mut channels[..active];
        for pipeline in self.channels.iter_mut().take(active) {
            pipeline.configure(&settings);
        }

        let len = buffers.iter().map(|b| b.len()).min().unwrap_or(0);
        let mut input_peak: f32 = 0.0;
        let mut output_peak: f32 = 0.0;

        for i in 0..len {
            let pad = self.pad.next(pad_target);

            for (buffer, pipeline) in buffers.iter_mut().zip(self.channels.iter_mut()) {
                let input = buffer[i];
                let processed = pipeline.process_sample(input, &settings) * pad * trim;
                let output = wet * processed + dry * input;
                buffer[i] = output;

                input_peak = input_peak.max(input.abs());
                output_peak = output_peak.max(output.abs());
            }

            self.scope_counter += 1;
            if self.scope_counter >= self.config.scope_decimation {
                self.scope_counter = 0;
                self.monitor.scope.write(buffers[0][i]);
            }
        }

        self.monitor.meters.publish(MeterReadings {
            input_peak,
            output_peak,
            pad_gain: self.pad.current(),
            total_multiplier: multiplier,
        });
    }

    /// Snapshot `params` and process
    pub fn process_block_with(&mut self, channels: &mut [&mut [f32]], params: &Parameters) {
        let snapshot = params.snapshot();
        self.process_block(channels, &snapshot);
    }

    /// Copy the scope ring, oldest first
    pub fn scope_snapshot(&self, out: &mut [f32]) -> usize {
        self.monitor.scope.snapshot(out)
    }

    /// Latest published meter values
    pub fn meters(&self) -> MeterReadings {
        self.monitor.meters.read()
    }

    /// Shared handle for UI readers
    pub fn monitor(&self) -> Arc<Monitor> {
        Arc::clone(&self.monitor)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Processing delay in samples (oversampler filters)
    pub fn latency_samples(&self) -> usize {
        self.channels[0].latency_samples()
    }
}
