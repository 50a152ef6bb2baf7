//! Real-time distortion engine for Ember
//!
//! Wraps the `ember-dsp` building blocks into a stereo processor:
//! - DistortionEngine: block processing, pad smoothing, wet/dry mix
//! - Parameters: lock-free parameter store read once per block
//! - Monitor: meters and oscilloscope ring shared with UI threads
//! - Presets: factory parameter sets
//!
//! The engine never installs a `tracing` subscriber and never logs from the
//! audio path.

mod config;
mod engine;
mod error;
mod meters;
mod monitor;
mod params;
mod pipeline;
mod presets;
mod scope;
mod stages;

pub use config::{EngineConfig, MAX_CHANNELS};
pub use engine::DistortionEngine;
pub use error::{validate_sample_rate, EngineError, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};
pub use meters::{MeterReadings, Meters};
pub use monitor::Monitor;
pub use params::{
    ParamRange, ParameterSnapshot, Parameters, COLOR_HZ, DRIVE_DB, INPUT_Q, MIX_PERCENT,
    OUTPUT_TRIM_DB, POST_FILTER_HZ,
};
pub use pipeline::{BlockSettings, ChannelPipeline};
pub use presets::{factory_presets, find_preset, Preset};
pub use scope::ScopeBuffer;
pub use stages::Stages;

pub use ember_dsp::FilterMode;
