use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_TIME_LABEL_FORMAT, EventCluster, EventLevel, Viewport, format_time_label,
    validate_time_label_format,
};
use crate::error::{TimelineError, TimelineResult};
use crate::render::{Color, level_color};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerLayoutConfig {
    pub marker_width_px: f64,
    /// `chrono` strftime pattern used for marker and detail time labels (UTC).
    pub time_label_format: String,
}

impl Default for MarkerLayoutConfig {
    fn default() -> Self {
        Self {
            marker_width_px: 24.0,
            time_label_format: DEFAULT_TIME_LABEL_FORMAT.to_owned(),
        }
    }
}

impl MarkerLayoutConfig {
    pub fn validate(&self) -> TimelineResult<()> {
        if !self.marker_width_px.is_finite() || self.marker_width_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "marker width must be finite and > 0".to_owned(),
            ));
        }
        validate_time_label_format(&self.time_label_format)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    /// Single event: level-colored dot with inline title, time and description.
    Event {
        level: EventLevel,
        color: Color,
        title: String,
        description: String,
        time_label: String,
    },
    /// Several events: count badge that opens the detail list on click.
    Cluster {
        count: usize,
        level: EventLevel,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMarker {
    pub cluster_index: usize,
    pub x: f64,
    pub left_px: f64,
    pub right_px: f64,
    pub first_time: f64,
    pub last_time: f64,
    pub kind: MarkerKind,
}

impl ClusterMarker {
    #[must_use]
    pub fn is_cluster(&self) -> bool {
        matches!(self.kind, MarkerKind::Cluster { .. })
    }
}

/// Places one marker per cluster at the pixel of its first event.
///
/// Positions are clamped inward so a marker never renders past either edge
/// of the container.
pub fn layout_cluster_markers(
    clusters: &[EventCluster<'_>],
    viewport: Viewport,
    container_width_px: f64,
    config: &MarkerLayoutConfig,
) -> TimelineResult<Vec<ClusterMarker>> {
    config.validate()?;
    if !container_width_px.is_finite() || container_width_px <= 0.0 {
        return Ok(Vec::new());
    }

    let half_width = 0.5 * config.marker_width_px;
    let mut markers = Vec::with_capacity(clusters.len());
    for (cluster_index, cluster) in clusters.iter().enumerate() {
        let x_raw = viewport.time_to_pixel(cluster.first_time(), container_width_px);
        let x = clamp_x(x_raw, half_width, container_width_px);
        let kind = if cluster.is_single() {
            let event = cluster.first();
            MarkerKind::Event {
                level: event.level,
                color: level_color(event.level),
                title: event.title.clone(),
                description: event.description.clone(),
                time_label: format_time_label(event.time, &config.time_label_format)?,
            }
        } else {
            let level = cluster.dominant_level();
            MarkerKind::Cluster {
                count: cluster.len(),
                level,
                color: level_color(level),
            }
        };

        markers.push(ClusterMarker {
            cluster_index,
            x,
            left_px: x - half_width,
            right_px: x + half_width,
            first_time: cluster.first_time(),
            last_time: cluster.last_time(),
            kind,
        });
    }

    Ok(markers)
}

/// Returns the index of the marker under `x`, preferring the closest center.
#[must_use]
pub fn find_marker_at(markers: &[ClusterMarker], x: f64) -> Option<usize> {
    if !x.is_finite() {
        return None;
    }
    markers
        .iter()
        .enumerate()
        .filter(|(_, marker)| x >= marker.left_px && x <= marker.right_px)
        .min_by_key(|(_, marker)| OrderedFloat((marker.x - x).abs()))
        .map(|(index, _)| index)
}

fn clamp_x(x: f64, half_width: f64, container_width: f64) -> f64 {
    if container_width <= 2.0 * half_width {
        container_width * 0.5
    } else {
        x.clamp(half_width, container_width - half_width)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub time: f64,
    pub time_label: String,
    pub title: String,
    pub description: String,
    pub level: EventLevel,
    pub color: Color,
}

/// Row list shown when a multi-event cluster is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterDetail {
    pub cluster_index: usize,
    pub rows: Vec<DetailRow>,
}

pub fn build_cluster_detail(
    cluster_index: usize,
    cluster: &EventCluster<'_>,
    config: &MarkerLayoutConfig,
) -> TimelineResult<ClusterDetail> {
    let rows = cluster
        .events()
        .iter()
        .map(|event| {
            Ok(DetailRow {
                time: event.time,
                time_label: format_time_label(event.time, &config.time_label_format)?,
                title: event.title.clone(),
                description: event.description.clone(),
                level: event.level,
                color: level_color(event.level),
            })
        })
        .collect::<TimelineResult<Vec<_>>>()?;
    Ok(ClusterDetail {
        cluster_index,
        rows,
    })
}
