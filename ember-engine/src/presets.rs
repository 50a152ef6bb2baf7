//! Factory presets
//!
//! Named starting points, kept in memory only.

use ember_dsp::FilterMode;
use ember_dsp::FilterMode::{BandPass, HighPass, LowPass};
use tracing::warn;

use crate::error::EngineError;
use crate::params::ParameterSnapshot;

/// A named parameter set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub params: ParameterSnapshot,
}

#[allow(clippy::too_many_arguments)]
const fn preset(
    name: &'static str,
    input_q: f32,
    color_hz: f32,
    filter_mode: FilterMode,
    drive_db: f32,
    post_filter_hz: f32,
    output_trim_db: f32,
    stages: (bool, bool, bool),
    mix_percent: f32,
) -> Preset {
    Preset {
        name,
        params: ParameterSnapshot {
            input_q,
            color_hz,
            filter_mode,
            drive_db,
            post_filter_hz,
            output_trim_db,
            stage_2x: stages.0,
            stage_5x: stages.1,
            stage_10x: stages.2,
            pad_enabled: true,
            mix_percent,
        },
    }
}

static FACTORY: [Preset; 8] = [
    preset(
        "Init",
        0.5,
        1000.0,
        BandPass,
        20.0,
        20000.0,
        0.0,
        (false, false, false),
        100.0,
    ),
    preset(
        "Warm Saturation",
        0.3,
        800.0,
        LowPass,
        15.0,
        12000.0,
        0.0,
        (false, false, false),
        70.0,
    ),
    preset(
        "Gritty Edge",
        0.6,
        2000.0,
        BandPass,
        28.0,
        15000.0,
        -2.0,
        (true, false, false),
        85.0,
    ),
    preset(
        "Heavy Crunch",
        0.5,
        1500.0,
        BandPass,
        35.0,
        10000.0,
        -3.0,
        (true, true, false),
        100.0,
    ),
    preset(
        "Extreme Destruction",
        0.7,
        3000.0,
        HighPass,
        40.0,
        8000.0,
        -5.0,
        (true, true, true),
        100.0,
    ),
    preset(
        "Subtle Tape",
        0.4,
        500.0,
        LowPass,
        8.0,
        18000.0,
        1.0,
        (false, false, false),
        50.0,
    ),
    preset(
        "Bright Exciter",
        0.8,
        5000.0,
        HighPass,
        18.0,
        20000.0,
        2.0,
        (false, false, false),
        40.0,
    ),
    preset(
        "Bass Thickener",
        0.6,
        200.0,
        LowPass,
        22.0,
        6000.0,
        0.0,
        (true, false, false),
        60.0,
    ),
];

/// All factory presets in display order
pub fn factory_presets() -> &'static [Preset] {
    &FACTORY
}

/// Look a preset up by name, ignoring case
pub fn find_preset(name: &str) -> Result<&'static Preset, EngineError> {
    match FACTORY.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim())) {
        Some(preset) => Ok(preset),
        None => {
            warn!(name, "unknown preset");
            Err(EngineError::UnknownPreset(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_bank() {
        let presets = factory_presets();
        assert_eq!(presets.len(), 8);
        assert_eq!(presets[0].name, "Init");

        for preset in presets {
            assert_eq!(
                preset.params.sanitized(),
                preset.params,
                "{} must already be in range",
                preset.name
            );
            assert!(preset.params.pad_enabled);
        }
    }

    #[test]
    fn test_find_preset() {
        let p = find_preset("extreme destruction").unwrap();
        assert_eq!(p.params.filter_mode, FilterMode::HighPass);
        assert_eq!(p.params.stage_multiplier(), 100.0);

        assert_eq!(find_preset("  Subtle Tape ").unwrap().params.mix_percent, 50.0);
        assert!(matches!(find_preset(""), Err(EngineError::UnknownPreset(_))));
    }
}
