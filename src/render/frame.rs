use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::render::{ClusterDetail, ClusterMarker, MarkerKind};

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    pub viewport: Viewport,
    pub container_width_px: f64,
    /// Visual cursor position; `None` when it lies outside the viewport.
    pub cursor_x: Option<f64>,
    pub markers: Vec<ClusterMarker>,
    pub detail: Option<ClusterDetail>,
}

impl TimelineFrame {
    #[must_use]
    pub fn new(viewport: Viewport, container_width_px: f64) -> Self {
        Self {
            viewport,
            container_width_px,
            cursor_x: None,
            markers: Vec::new(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_cursor_x(mut self, cursor_x: Option<f64>) -> Self {
        self.cursor_x = cursor_x;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: Vec<ClusterMarker>) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: Option<ClusterDetail>) -> Self {
        self.detail = detail;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.container_width_px.is_finite() || self.container_width_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "frame container width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(cursor_x) = self.cursor_x {
            if !cursor_x.is_finite() {
                return Err(TimelineError::InvalidData(
                    "frame cursor must be finite".to_owned(),
                ));
            }
        }

        for marker in &self.markers {
            if !marker.x.is_finite() || marker.x < 0.0 || marker.x > self.container_width_px {
                return Err(TimelineError::InvalidData(format!(
                    "marker {} lies outside the container",
                    marker.cluster_index
                )));
            }
            match &marker.kind {
                MarkerKind::Event { color, .. } => color.validate()?,
                MarkerKind::Cluster { count, color, .. } => {
                    if *count < 2 {
                        return Err(TimelineError::InvalidData(
                            "cluster markers must group at least two events".to_owned(),
                        ));
                    }
                    color.validate()?;
                }
            }
        }

        if let Some(detail) = &self.detail {
            for row in &detail.rows {
                row.color.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.cursor_x.is_none()
    }
}
