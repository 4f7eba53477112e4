use crate::error::{TimelineError, TimelineResult};

pub(super) fn validate_finite(value: f64, what: &str) -> TimelineResult<f64> {
    if !value.is_finite() {
        return Err(TimelineError::InvalidData(format!("{what} must be finite")));
    }
    Ok(value)
}

pub(super) fn validate_container_width(width_px: f64) -> TimelineResult<f64> {
    if !width_px.is_finite() || width_px < 0.0 {
        return Err(TimelineError::InvalidData(
            "container width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(width_px)
}

pub(super) fn validate_camera_id(camera_id: &str) -> TimelineResult<()> {
    if camera_id.trim().is_empty() {
        return Err(TimelineError::InvalidData(
            "camera id must not be empty".to_owned(),
        ));
    }
    Ok(())
}
