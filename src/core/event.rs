use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Severity attached to every timeline event.
///
/// Variants are ordered by severity so `max()` yields the most severe level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Verbose,
    #[default]
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl EventLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One timestamped occurrence on a camera timeline.
///
/// `time` is expressed in unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: f64,
    pub title: String,
    pub description: String,
    pub level: EventLevel,
}

impl Event {
    #[must_use]
    pub fn new(time: f64, level: EventLevel, title: impl Into<String>) -> Self {
        Self {
            time,
            title: title.into(),
            description: String::new(),
            level,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Event timestamp as delivered by a remote source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEventTime {
    Millis(f64),
    Text(String),
}

impl RawEventTime {
    /// Resolves the timestamp to unix milliseconds.
    ///
    /// Text accepts RFC 3339 and offset-less ISO 8601 (read as UTC). Times
    /// outside the `chrono` calendar range resolve to `None`.
    #[must_use]
    pub fn to_unix_millis(&self) -> Option<f64> {
        let millis = match self {
            Self::Millis(value) => *value,
            Self::Text(text) => {
                let text = text.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    parsed.timestamp_millis() as f64
                } else {
                    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()?
                        .and_utc()
                        .timestamp_millis() as f64
                }
            }
        };
        let representable =
            millis.is_finite() && DateTime::from_timestamp_millis(millis.round() as i64).is_some();
        representable.then_some(millis)
    }
}

/// Loosely-typed event record accepted from event sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub time: Option<RawEventTime>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level: EventLevel,
}

impl RawEvent {
    #[must_use]
    pub fn at_millis(time: f64, level: EventLevel, title: impl Into<String>) -> Self {
        Self {
            time: Some(RawEventTime::Millis(time)),
            title: title.into(),
            description: String::new(),
            level,
        }
    }

    /// Converts into an [`Event`], or `None` when the time is missing or unusable.
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        let time = self.time.as_ref()?.to_unix_millis()?;
        Some(Event {
            time,
            title: self.title,
            description: self.description,
            level: self.level,
        })
    }
}

/// Outcome of [`sanitize_events`].
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedEvents {
    pub events: Vec<Event>,
    pub dropped: usize,
}

/// Drops records without a usable timestamp; the rest keep their input order.
#[must_use]
pub fn sanitize_events(raw: Vec<RawEvent>) -> SanitizedEvents {
    let total = raw.len();
    let events: Vec<Event> = raw.into_iter().filter_map(RawEvent::into_event).collect();
    let dropped = total - events.len();
    if dropped > 0 {
        debug!(dropped, kept = events.len(), "dropped timeline events without a usable time");
    }
    SanitizedEvents { events, dropped }
}
