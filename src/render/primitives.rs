use serde::{Deserialize, Serialize};

use crate::core::EventLevel;
use crate::error::{TimelineError, TimelineResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> TimelineResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TimelineError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

pub const VERBOSE_COLOR: Color = Color::rgb(0.62, 0.62, 0.62);
pub const INFO_COLOR: Color = Color::rgb(0.09, 0.47, 1.0);
pub const WARNING_COLOR: Color = Color::rgb(0.98, 0.68, 0.08);
pub const ERROR_COLOR: Color = Color::rgb(0.96, 0.13, 0.18);

/// Fixed dot color for each event level.
#[must_use]
pub const fn level_color(level: EventLevel) -> Color {
    match level {
        EventLevel::Verbose => VERBOSE_COLOR,
        EventLevel::Info => INFO_COLOR,
        EventLevel::Warning => WARNING_COLOR,
        EventLevel::Error => ERROR_COLOR,
    }
}
