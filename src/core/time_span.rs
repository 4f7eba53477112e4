use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TimelineError, TimelineResult};

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_TICK: i64 = 100;
const TICK_DIGITS: usize = 7;

/// Signed duration using the `[-][d.]hh:mm:ss[.fffffff]` text form that
/// segment durations are exchanged in.
///
/// Parsing also accepts a bare day count (`"3"`) and `hh:mm` without
/// seconds. Fractions carry up to seven digits (100 ns ticks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan(TimeDelta);

impl TimeSpan {
    #[must_use]
    pub const fn from_delta(delta: TimeDelta) -> Self {
        Self(delta)
    }

    #[must_use]
    pub fn hours(hours: i64) -> Self {
        Self(TimeDelta::hours(hours))
    }

    #[must_use]
    pub fn minutes(minutes: i64) -> Self {
        Self(TimeDelta::minutes(minutes))
    }

    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        self.0
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < TimeDelta::zero()
    }

    /// Duration in milliseconds, keeping sub-millisecond precision when it fits.
    #[must_use]
    pub fn as_millis_f64(self) -> f64 {
        match self.0.num_microseconds() {
            Some(micros) => micros as f64 / 1_000.0,
            None => self.0.num_milliseconds() as f64,
        }
    }

    pub fn parse(input: &str) -> TimelineResult<Self> {
        let invalid = || TimelineError::InvalidTimeSpan(input.to_owned());

        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return Err(invalid());
        }

        let parts: Vec<&str> = body.split(':').collect();
        let (days, hours, minutes, seconds, ticks) = match parts.as_slice() {
            [days] => (parse_digits(days).ok_or_else(invalid)?, 0, 0, 0, 0),
            [head, minutes] | [head, minutes, _] => {
                let (days, hours) = match head.split_once('.') {
                    Some((days, hours)) => (parse_digits(days).ok_or_else(invalid)?, hours),
                    None => (0, *head),
                };
                let hours = parse_bounded(hours, 24).ok_or_else(invalid)?;
                let minutes = parse_bounded(minutes, 60).ok_or_else(invalid)?;
                let (seconds, ticks) = match parts.get(2) {
                    Some(tail) => parse_seconds(tail).ok_or_else(invalid)?,
                    None => (0, 0),
                };
                (days, hours, minutes, seconds, ticks)
            }
            _ => return Err(invalid()),
        };

        let total_seconds = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|value| value.checked_add(hours * 3_600 + minutes * 60 + seconds))
            .ok_or_else(invalid)?;
        let delta = TimeDelta::try_seconds(total_seconds)
            .and_then(|value| value.checked_add(&TimeDelta::nanoseconds(ticks * NANOS_PER_TICK)))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -delta } else { delta }))
    }
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_bounded(text: &str, limit: i64) -> Option<i64> {
    parse_digits(text).filter(|value| *value < limit)
}

fn parse_seconds(text: &str) -> Option<(i64, i64)> {
    let (seconds, fraction) = match text.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (text, None),
    };
    let seconds = parse_bounded(seconds, 60)?;
    let ticks = match fraction {
        Some(fraction) => {
            if fraction.len() > TICK_DIGITS {
                return None;
            }
            let scale = 10_i64.pow((TICK_DIGITS - fraction.len()) as u32);
            parse_digits(fraction)? * scale
        }
        None => 0,
    };
    Some((seconds, ticks))
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self(TimeDelta::zero())
    }
}

impl FromStr for TimeSpan {
    type Err = TimelineError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = if self.is_negative() { -self.0 } else { self.0 };
        let total_seconds = magnitude.num_seconds();
        let ticks = i64::from(magnitude.subsec_nanos()) / NANOS_PER_TICK;

        let days = total_seconds / SECONDS_PER_DAY;
        let hours = (total_seconds % SECONDS_PER_DAY) / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;

        if self.is_negative() {
            f.write_str("-")?;
        }
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if ticks > 0 {
            write!(f, ".{ticks:07}")?;
        }
        Ok(())
    }
}

impl Serialize for TimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
