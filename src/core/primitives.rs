use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_TIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> TimelineResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(TimelineError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    DateTime::from_timestamp_millis(millis.round() as i64).ok_or_else(|| {
        TimelineError::InvalidData(format!("timestamp {millis} is outside the supported range"))
    })
}

pub fn validate_time_label_format(pattern: &str) -> TimelineResult<()> {
    if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(TimelineError::InvalidData(format!(
            "time label format `{pattern}` is not a valid strftime pattern"
        )));
    }
    Ok(())
}

/// Formats unix milliseconds in UTC with a `chrono` strftime pattern.
pub fn format_time_label(millis: f64, pattern: &str) -> TimelineResult<String> {
    let time = unix_millis_to_datetime(millis)?;
    let mut label = String::new();
    write!(label, "{}", time.format(pattern)).map_err(|_| {
        TimelineError::InvalidData(format!("failed to format time label with `{pattern}`"))
    })?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::{format_time_label, validate_time_label_format};

    #[test]
    fn formats_utc_labels() {
        let label = format_time_label(1_709_294_400_000.0, "%Y-%m-%d %H:%M:%S").expect("label");
        assert_eq!(label, "2024-03-01 12:00:00");
    }

    #[test]
    fn rejects_broken_patterns() {
        assert!(validate_time_label_format("%Y-%").is_err());
        assert!(validate_time_label_format("").is_err());
        assert!(format_time_label(f64::NAN, "%H").is_err());
    }
}
