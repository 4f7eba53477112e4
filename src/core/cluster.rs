use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Event, EventLevel, Viewport};
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_CLUSTER_THRESHOLD_PX: f64 = 40.0;

/// Tuning for pixel-distance clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Maximum pixel distance between an event and the previous event of the
    /// same cluster.
    pub threshold_px: f64,
    /// Optional cap on the distance between the first and last event of a
    /// cluster. `None` keeps chained adjacency unbounded.
    pub max_span_px: Option<f64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_CLUSTER_THRESHOLD_PX,
            max_span_px: None,
        }
    }
}

impl ClusterConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.threshold_px.is_finite() || self.threshold_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "cluster threshold must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(max_span) = self.max_span_px {
            if !max_span.is_finite() || max_span < self.threshold_px {
                return Err(TimelineError::InvalidData(
                    "cluster max span must be finite and >= threshold".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}

/// Events rendered close enough to share one marker.
///
/// Never empty; events are in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCluster<'a> {
    events: SmallVec<[&'a Event; 4]>,
}

impl<'a> EventCluster<'a> {
    fn start(event: &'a Event) -> Self {
        let mut events = SmallVec::new();
        events.push(event);
        Self { events }
    }

    #[must_use]
    pub fn events(&self) -> &[&'a Event] {
        &self.events
    }

    #[must_use]
    pub fn first(&self) -> &'a Event {
        self.events[0]
    }

    #[must_use]
    pub fn last(&self) -> &'a Event {
        self.events[self.events.len() - 1]
    }

    #[must_use]
    pub fn first_time(&self) -> f64 {
        self.first().time
    }

    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.last().time
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        self.events.len() == 1
    }

    /// Most severe level among member events.
    #[must_use]
    pub fn dominant_level(&self) -> EventLevel {
        self.events
            .iter()
            .map(|event| event.level)
            .max()
            .unwrap_or_default()
    }
}

/// Groups visible events whose projected pixel positions sit within
/// `config.threshold_px` of their predecessor.
///
/// This is a single greedy left-to-right pass: the threshold bounds the
/// distance between neighbours, not the width of a cluster, unless
/// `max_span_px` is set. A container that has not been laid out yet
/// (`container_width_px <= 0`) shows no events.
pub fn cluster_events<'a>(
    events: &'a [Event],
    viewport: Viewport,
    container_width_px: f64,
    config: ClusterConfig,
) -> TimelineResult<Vec<EventCluster<'a>>> {
    let config = config.validate()?;
    if !container_width_px.is_finite() || container_width_px <= 0.0 {
        return Ok(Vec::new());
    }

    let mut visible: Vec<&Event> = events
        .iter()
        .filter(|event| event.time.is_finite() && viewport.contains(event.time))
        .collect();
    visible.sort_by_key(|event| OrderedFloat(event.time));

    let mut clusters = Vec::new();
    let mut visible = visible.into_iter();
    let Some(first) = visible.next() else {
        return Ok(clusters);
    };

    let to_px = |event: &Event| viewport.time_to_pixel(event.time, container_width_px);
    let mut current = EventCluster::start(first);
    let mut first_x = to_px(first);
    let mut last_x = first_x;

    for event in visible {
        let x = to_px(event);
        let within_threshold = x - last_x <= config.threshold_px;
        let within_span = config
            .max_span_px
            .is_none_or(|max_span| x - first_x <= max_span);

        if within_threshold && within_span {
            current.events.push(event);
        } else {
            clusters.push(std::mem::replace(&mut current, EventCluster::start(event)));
            first_x = x;
        }
        last_x = x;
    }
    clusters.push(current);

    Ok(clusters)
}
