//! Parameter model
//!
//! Features:
//! - `ParameterSnapshot`: plain copy of every control, read once per block
//! - `ParamRange`: min/max/default per continuous control, NaN-safe clamping
//! - `Parameters`: lock-free store the host or UI writes while audio runs
//!
//! Each control is stored in its own atomic, so a snapshot may mix values
//! from before and after a concurrent write. That is harmless: the engine
//! only ever sees in-range values and picks up the rest next block.

use ember_dsp::FilterMode;
use portable_atomic::{AtomicBool, AtomicF32, AtomicU8, Ordering};
use tracing::debug;

use crate::error::EngineError;
use crate::presets::find_preset;
use crate::stages::Stages;

/// Range and default of a continuous control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp into range; NaN falls back to the default
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// SVF resonance control
pub const INPUT_Q: ParamRange = ParamRange::new(0.1, 1.0, 0.5);
/// SVF cutoff (Hz)
pub const COLOR_HZ: ParamRange = ParamRange::new(20.0, 20_000.0, 1000.0);
/// Pre-shaper drive (dB)
pub const DRIVE_DB: ParamRange = ParamRange::new(0.0, 40.0, 0.0);
/// Post filter cutoff (Hz)
pub const POST_FILTER_HZ: ParamRange = ParamRange::new(2000.0, 20_000.0, 20_000.0);
/// Output trim (dB)
pub const OUTPUT_TRIM_DB: ParamRange = ParamRange::new(-12.0, 12.0, 0.0);
/// Wet amount (%)
pub const MIX_PERCENT: ParamRange = ParamRange::new(0.0, 100.0, 100.0);

/// Every control value for one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    pub input_q: f32,
    pub color_hz: f32,
    pub filter_mode: FilterMode,
    pub drive_db: f32,
    pub post_filter_hz: f32,
    pub output_trim_db: f32,
    pub stage_2x: bool,
    pub stage_5x: bool,
    pub stage_10x: bool,
    pub pad_enabled: bool,
    pub mix_percent: f32,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            input_q: INPUT_Q.default,
            color_hz: COLOR_HZ.default,
            filter_mode: FilterMode::BandPass,
            drive_db: DRIVE_DB.default,
            post_filter_hz: POST_FILTER_HZ.default,
            output_trim_db: OUTPUT_TRIM_DB.default,
            stage_2x: false,
            stage_5x: false,
            stage_10x: false,
            pad_enabled: true,
            mix_percent: MIX_PERCENT.default,
        }
    }
}

impl ParameterSnapshot {
    /// Copy with every float clamped into its range
    pub fn sanitized(&self) -> Self {
        Self {
            input_q: INPUT_Q.clamp(self.input_q),
            color_hz: COLOR_HZ.clamp(self.color_hz),
            drive_db: DRIVE_DB.clamp(self.drive_db),
            post_filter_hz: POST_FILTER_HZ.clamp(self.post_filter_hz),
            output_trim_db: OUTPUT_TRIM_DB.clamp(self.output_trim_db),
            mix_percent: MIX_PERCENT.clamp(self.mix_percent),
            ..*self
        }
    }

    pub fn stages(&self) -> Stages {
        Stages::new(self.stage_2x, self.stage_5x, self.stage_10x)
    }

    pub fn stage_multiplier(&self) -> f32 {
        self.stages().multiplier()
    }

    /// Wet fraction in `[0, 1]`
    pub fn wet(&self) -> f32 {
        MIX_PERCENT.clamp(self.mix_percent) / 100.0
    }
}

/// Shared, lock-free parameter store
///
/// Setters clamp on the way in; `snapshot` is safe to call from the audio
/// thread.
#[derive(Debug)]
pub struct Parameters {
    input_q: AtomicF32,
    color_hz: AtomicF32,
    filter_mode: AtomicU8,
    drive_db: AtomicF32,
    post_filter_hz: AtomicF32,
    output_trim_db: AtomicF32,
    stage_2x: AtomicBool,
    stage_5x: AtomicBool,
    stage_10x: AtomicBool,
    pad_enabled: AtomicBool,
    mix_percent: AtomicF32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from_snapshot(&ParameterSnapshot::default())
    }
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `snapshot` (sanitized)
    pub fn from_snapshot(snapshot: &ParameterSnapshot) -> Self {
        let s = snapshot.sanitized();
        Self {
            input_q: AtomicF32::new(s.input_q),
            color_hz: AtomicF32::new(s.color_hz),
            filter_mode: AtomicU8::new(s.filter_mode.index()),
            drive_db: AtomicF32::new(s.drive_db),
            post_filter_hz: AtomicF32::new(s.post_filter_hz),
            output_trim_db: AtomicF32::new(s.output_trim_db),
            stage_2x: AtomicBool::new(s.stage_2x),
            stage_5x: AtomicBool::new(s.stage_5x),
            stage_10x: AtomicBool::new(s.stage_10x),
            pad_enabled: AtomicBool::new(s.pad_enabled),
            mix_percent: AtomicF32::new(s.mix_percent),
        }
    }

    /// Read every control once
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            input_q: self.input_q.load(Ordering::Relaxed),
            color_hz: self.color_hz.load(Ordering::Relaxed),
            filter_mode: FilterMode::from_index(self.filter_mode.load(Ordering::Relaxed)),
            drive_db: self.drive_db.load(Ordering::Relaxed),
            post_filter_hz: self.post_filter_hz.load(Ordering::Relaxed),
            output_trim_db: self.output_trim_db.load(Ordering::Relaxed),
            stage_2x: self.stage_2x.load(Ordering::Relaxed),
            stage_5x: self.stage_5x.load(Ordering::Relaxed),
            stage_10x: self.stage_10x.load(Ordering::Relaxed),
            pad_enabled: self.pad_enabled.load(Ordering::Relaxed),
            mix_percent: self.mix_percent.load(Ordering::Relaxed),
        }
    }

    /// Overwrite every control
    pub fn apply(&self, snapshot: &ParameterSnapshot) {
        self.set_input_q(snapshot.input_q);
        self.set_color_hz(snapshot.color_hz);
        self.set_filter_mode(snapshot.filter_mode);
        self.set_drive_db(snapshot.drive_db);
        self.set_post_filter_hz(snapshot.post_filter_hz);
        self.set_output_trim_db(snapshot.output_trim_db);
        self.set_stages(snapshot.stages());
        self.set_pad_enabled(snapshot.pad_enabled);
        self.set_mix_percent(snapshot.mix_percent);
    }

    /// Apply a factory preset by name
    pub fn load_preset(&self, name: &str) -> Result<(), EngineError> {
        let preset = find_preset(name)?;
        self.apply(&preset.params);
        debug!(preset = preset.name, "preset loaded");
        Ok(())
    }

    pub fn set_input_q(&self, value: f32) {
        self.input_q.store(INPUT_Q.clamp(value), Ordering::Relaxed);
    }

    pub fn set_color_hz(&self, value: f32) {
        self.color_hz.store(COLOR_HZ.clamp(value), Ordering::Relaxed);
    }

    pub fn set_filter_mode(&self, mode: FilterMode) {
        self.filter_mode.store(mode.index(), Ordering::Relaxed);
    }

    pub fn set_drive_db(&self, value: f32) {
        self.drive_db.store(DRIVE_DB.clamp(value), Ordering::Relaxed);
    }

    pub fn set_post_filter_hz(&self, value: f32) {
        self.post_filter_hz
            .store(POST_FILTER_HZ.clamp(value), Ordering::Relaxed);
    }

    pub fn set_output_trim_db(&self, value: f32) {
        self.output_trim_db
            .store(OUTPUT_TRIM_DB.clamp(value), Ordering::Relaxed);
    }

    pub fn set_stages(&self, stages: Stages) {
        self.stage_2x.store(stages.x2, Ordering::Relaxed);
        self.stage_5x.store(stages.x5, Ordering::Relaxed);
        self.stage_10x.store(stages.x10, Ordering::Relaxed);
    }

    pub fn set_pad_enabled(&self, enabled: bool) {
        self.pad_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn set_mix_percent(&self, value: f32) {
        self.mix_percent.store(MIX_PERCENT.clamp(value), Ordering::Relaxed);
    }
}
