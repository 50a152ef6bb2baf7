//! Block-rate level meters

use portable_atomic::{AtomicF32, Ordering};

/// One block's worth of metering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterReadings {
    /// Largest absolute input sample across processed channels
    pub input_peak: f32,
    /// Largest absolute output sample across processed channels
    pub output_peak: f32,
    /// Pad gain at the end of the block
    pub pad_gain: f32,
    /// Active stage multiplier
    pub total_multiplier: f32,
}

impl Default for MeterReadings {
    fn default() -> Self {
        Self {
            input_peak: 0.0,
            output_peak: 0.0,
            pad_gain: 1.0,
            total_multiplier: 1.0,
        }
    }
}

/// Meter values shared with the UI thread
///
/// Each field is written once per block by the audio thread.
#[derive(Debug)]
pub struct Meters {
    input_peak: AtomicF32,
    output_peak: AtomicF32,
    pad_gain: AtomicF32,
    total_multiplier: AtomicF32,
}

impl Default for Meters {
    fn default() -> Self {
        let r = MeterReadings::default();
        Self {
            input_peak: AtomicF32::new(r.input_peak),
            output_peak: AtomicF32::new(r.output_peak),
            pad_gain: AtomicF32::new(r.pad_gain),
            total_multiplier: AtomicF32::new(r.total_multiplier),
        }
    }
}

impl Meters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, readings: MeterReadings) {
        self.input_peak.store(readings.input_peak, Ordering::Relaxed);
        self.output_peak.store(readings.output_peak, Ordering::Relaxed);
        self.pad_gain.store(readings.pad_gain, Ordering::Relaxed);
        self.total_multiplier
            .store(readings.total_multiplier, Ordering::Relaxed);
    }

    pub fn read(&self) -> MeterReadings {
        MeterReadings {
            input_peak: self.input_peak.load(Ordering::Relaxed),
            output_peak: self.output_peak.load(Ordering::Relaxed),
            pad_gain: self.pad_gain.load(Ordering::Relaxed),
            total_multiplier: self.total_multiplier.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.publish(MeterReadings::default());
    }
}
