//! Drive stage multipliers
//!
//! Three switchable gain stages (2x, 5x, 10x) that stack multiplicatively
//! on top of the dB drive. Changes apply at block boundaries only.

/// Enabled gain stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Stages {
    pub x2: bool,
    pub x5: bool,
    pub x10: bool,
}

impl Stages {
    pub const fn new(x2: bool, x5: bool, x10: bool) -> Self {
        Self { x2, x5, x10 }
    }

    /// Product of the enabled factors, 1 when none are on
    pub fn multiplier(&self) -> f32 {
        let mut total = 1.0;
        if self.x2 {
            total *= 2.0;
        }
        if self.x5 {
            total *= 5.0;
        }
        if self.x10 {
            total *= 10.0;
        }
        total
    }

    /// Short label for displays, e.g. "2x+5x"
    pub fn label(&self) -> &'static str {
        match (self.x2, self.x5, self.x10) {
            (false, false, false) => "OFF",
            (true, false, false) => "2x",
            (false, true, false) => "5x",
            (false, false, true) => "10x",
            (true, true, false) => "2x+5x",
            (true, false, true) => "2x+10x",
            (false, true, true) => "5x+10x",
            (true, true, true) => "2x+5x+10x",
        }
    }
}
