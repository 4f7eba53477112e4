use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Visible time window of the timeline, in unix milliseconds.
///
/// The window is always non-empty (`min < max`). Panning translates it without
/// changing its width; only construction changes the width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    min: f64,
    max: f64,
}

impl Viewport {
    pub fn new(min: f64, max: f64) -> TimelineResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(TimelineError::InvalidViewport { min, max });
        }
        Ok(Self { min, max })
    }

    /// Builds a window of `span` that starts `lead` before `cursor`.
    pub fn with_lead(cursor: f64, span: f64, lead: f64) -> TimelineResult<Self> {
        if !cursor.is_finite() || !lead.is_finite() {
            return Err(TimelineError::InvalidData(
                "viewport cursor and lead must be finite".to_owned(),
            ));
        }
        if !span.is_finite() || span <= 0.0 {
            return Err(TimelineError::InvalidData(
                "viewport span must be finite and > 0".to_owned(),
            ));
        }
        let min = cursor - lead;
        Self::new(min, min + span)
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.min && time <= self.max
    }

    /// Translates both bounds by an additive time delta.
    pub fn shifted(self, delta_time: f64) -> TimelineResult<Self> {
        if !delta_time.is_finite() {
            return Err(TimelineError::InvalidData(
                "viewport shift delta must be finite".to_owned(),
            ));
        }
        Self::new(self.min + delta_time, self.max + delta_time)
    }

    /// Pans by a pixel delta measured against a container of `container_width_px`.
    ///
    /// A positive delta moves the window forward in time. There is no clamp:
    /// the window may scroll arbitrarily far away from any data.
    pub fn pan(self, delta_px: f64, container_width_px: f64) -> TimelineResult<Self> {
        if !delta_px.is_finite() {
            return Err(TimelineError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        if !container_width_px.is_finite() || container_width_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "pan container width must be finite and > 0".to_owned(),
            ));
        }
        self.shifted((delta_px / container_width_px) * self.span())
    }

    /// Keeps `cursor` inside the dead zone `[min + margin, max - margin]`.
    ///
    /// When the cursor is past either margin boundary the window shifts by
    /// exactly the overshoot, leaving the cursor on the boundary.
    pub fn advance(self, cursor: f64, margin_ratio: f64) -> TimelineResult<Self> {
        if !cursor.is_finite() {
            return Err(TimelineError::InvalidData(
                "follow cursor must be finite".to_owned(),
            ));
        }
        if !margin_ratio.is_finite() || !(0.0..0.5).contains(&margin_ratio) {
            return Err(TimelineError::InvalidData(
                "follow margin ratio must be finite and in [0, 0.5)".to_owned(),
            ));
        }

        let margin = self.span() * margin_ratio;
        let forward_trigger = self.max - margin;
        let backward_trigger = self.min + margin;

        if cursor > forward_trigger {
            self.shifted(cursor - forward_trigger)
        } else if cursor < backward_trigger {
            self.shifted(cursor - backward_trigger)
        } else {
            Ok(self)
        }
    }

    /// Projects a time onto `[0, container_width_px]` without range checks.
    #[must_use]
    pub fn time_to_pixel(self, time: f64, container_width_px: f64) -> f64 {
        ((time - self.min) / self.span()) * container_width_px
    }

    pub fn pixel_to_time(self, pixel: f64, container_width_px: f64) -> TimelineResult<f64> {
        if !pixel.is_finite() {
            return Err(TimelineError::InvalidData(
                "pixel must be finite".to_owned(),
            ));
        }
        if !container_width_px.is_finite() || container_width_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "container width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self.min + (pixel / container_width_px) * self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;

    const HOUR: f64 = 3_600_000.0;

    #[test]
    fn rejects_empty_or_inverted_windows() {
        assert!(Viewport::new(10.0, 10.0).is_err());
        assert!(Viewport::new(10.0, 5.0).is_err());
        assert!(Viewport::new(f64::NAN, 5.0).is_err());
    }

    #[test]
    fn advance_shifts_back_by_overshoot_when_cursor_precedes_margin() {
        let viewport = Viewport::new(0.0, 24.0 * HOUR).expect("viewport");
        let next = viewport.advance(2.0 * HOUR, 0.3).expect("advance");
        let expected_shift = 2.0 * HOUR - 7.2 * HOUR;
        assert!((next.min() - expected_shift).abs() <= 1e-6);
        assert!((next.span() - viewport.span()).abs() <= 1e-6);
    }

    #[test]
    fn advance_accepts_cursor_exactly_on_boundary() {
        let viewport = Viewport::new(0.0, 1000.0).expect("viewport");
        assert_eq!(viewport.advance(700.0, 0.3).expect("advance"), viewport);
        assert_eq!(viewport.advance(300.0, 0.3).expect("advance"), viewport);
    }

    #[test]
    fn pixel_projection_round_trips() {
        let viewport = Viewport::new(1_000.0, 2_000.0).expect("viewport");
        let px = viewport.time_to_pixel(1_250.0, 400.0);
        assert!((px - 100.0).abs() <= 1e-9);
        let back = viewport.pixel_to_time(px, 400.0).expect("time");
        assert!((back - 1_250.0).abs() <= 1e-9);
    }

    #[test]
    fn pan_rejects_zero_width_container() {
        let viewport = Viewport::new(0.0, 10.0).expect("viewport");
        assert!(viewport.pan(5.0, 0.0).is_err());
    }
}
