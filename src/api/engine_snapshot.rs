use serde::{Deserialize, Serialize};

use crate::core::{EventLevel, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{CursorState, DragMode};
use crate::render::Renderer;

use super::TimelineEngine;

pub const TIMELINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub first_time: f64,
    pub last_time: f64,
    pub len: usize,
    pub dominant_level: EventLevel,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub camera_id: Option<String>,
    pub viewport: Viewport,
    pub container_width_px: f64,
    pub cursor: CursorState,
    pub drag_mode: DragMode,
    pub events_len: usize,
    pub clusters: Vec<ClusterSummary>,
    pub open_detail: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: TimelineSnapshot,
}

impl TimelineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineSnapshotJsonContractV1 {
            schema_version: TIMELINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<TimelineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: TimelineSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                TimelineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != TIMELINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn snapshot(&self) -> TimelineResult<TimelineSnapshot> {
        let clusters = self
            .clusters()?
            .iter()
            .map(|cluster| ClusterSummary {
                first_time: cluster.first_time(),
                last_time: cluster.last_time(),
                len: cluster.len(),
                dominant_level: cluster.dominant_level(),
            })
            .collect();

        Ok(TimelineSnapshot {
            camera_id: self.camera_id.clone(),
            viewport: self.viewport,
            container_width_px: self.container_width_px,
            cursor: self.cursor,
            drag_mode: self.drag.mode(),
            events_len: self.events.len(),
            clusters,
            open_detail: self.detail.as_ref().map(|detail| detail.cluster_index),
        })
    }
}
