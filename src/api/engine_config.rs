use serde::{Deserialize, Serialize};

use crate::core::{ClusterConfig, TimeSpan};
use crate::error::{TimelineError, TimelineResult};
use crate::render::MarkerLayoutConfig;

pub const DEFAULT_FOLLOW_MARGIN_RATIO: f64 = 0.3;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist timeline setup next to their own
/// settings; every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Width of the visible window.
    pub follow_span: TimeSpan,
    /// How far before the cursor a fresh window starts.
    pub follow_lead: TimeSpan,
    /// Fraction of the window width kept as margin on each side of the dead zone.
    pub follow_margin_ratio: f64,
    /// Measured container width; `0` until the host has laid the widget out.
    pub container_width_px: f64,
    pub cluster: ClusterConfig,
    pub markers: MarkerLayoutConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            follow_span: TimeSpan::hours(24),
            follow_lead: TimeSpan::hours(2),
            follow_margin_ratio: DEFAULT_FOLLOW_MARGIN_RATIO,
            container_width_px: 0.0,
            cluster: ClusterConfig::default(),
            markers: MarkerLayoutConfig::default(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn with_follow_span(mut self, span: TimeSpan) -> Self {
        self.follow_span = span;
        self
    }

    #[must_use]
    pub fn with_follow_lead(mut self, lead: TimeSpan) -> Self {
        self.follow_lead = lead;
        self
    }

    #[must_use]
    pub fn with_follow_margin_ratio(mut self, ratio: f64) -> Self {
        self.follow_margin_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_container_width(mut self, width_px: f64) -> Self {
        self.container_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_cluster_config(mut self, cluster: ClusterConfig) -> Self {
        self.cluster = cluster;
        self
    }

    #[must_use]
    pub fn with_marker_layout(mut self, markers: MarkerLayoutConfig) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn follow_span_ms(&self) -> f64 {
        self.follow_span.as_millis_f64()
    }

    #[must_use]
    pub fn follow_lead_ms(&self) -> f64 {
        self.follow_lead.as_millis_f64()
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.follow_span_ms() <= 0.0 {
            return Err(TimelineError::InvalidData(
                "follow span must be > 0".to_owned(),
            ));
        }
        if self.follow_lead.is_negative() || self.follow_lead_ms() >= self.follow_span_ms() {
            return Err(TimelineError::InvalidData(
                "follow lead must be >= 0 and shorter than the follow span".to_owned(),
            ));
        }
        if !self.follow_margin_ratio.is_finite() || !(0.0..0.5).contains(&self.follow_margin_ratio)
        {
            return Err(TimelineError::InvalidData(
                "follow margin ratio must be finite and in [0, 0.5)".to_owned(),
            ));
        }
        if !self.container_width_px.is_finite() || self.container_width_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "container width must be finite and >= 0".to_owned(),
            ));
        }
        self.cluster.validate()?;
        self.markers.validate()
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}
