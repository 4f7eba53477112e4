use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TimelineError, TimelineResult};
use crate::extensions::TimelineEvent;
use crate::render::{ClusterDetail, Renderer, build_cluster_detail, find_marker_at};

use super::TimelineEngine;
use super::validation::validate_finite;

/// Result of activating a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkerActivation {
    /// Single event: the time was changed and committed in one step.
    Committed { time: f64 },
    /// Multi-event cluster: the detail list was opened instead.
    DetailOpened { cluster_index: usize, rows: usize },
}

enum Selection {
    Single(f64),
    Multi(ClusterDetail),
}

impl<R: Renderer> TimelineEngine<R> {
    /// Slider moved: moves the visual cursor without committing.
    pub fn slider_change(&mut self, time: f64) -> TimelineResult<()> {
        let time = validate_finite(time, "slider time")?;
        self.cursor.on_change(time);
        self.emit_event(TimelineEvent::TimeChanging { time });
        self.follow_cursor()
    }

    /// Slider moved to a track pixel.
    pub fn slider_change_at_pixel(&mut self, x: f64) -> TimelineResult<()> {
        let time = self.pixel_to_time(x)?;
        self.slider_change(time)
    }

    /// Slider released: commits exactly once.
    pub fn slider_commit(&mut self, time: f64) -> TimelineResult<()> {
        let time = validate_finite(time, "slider time")?;
        self.cursor.on_commit(time);
        self.emit_event(TimelineEvent::TimeCommitted { time });
        self.follow_cursor()
    }

    /// Activates the marker of cluster `cluster_index` in the current layout.
    pub fn click_marker(&mut self, cluster_index: usize) -> TimelineResult<MarkerActivation> {
        let selection = {
            let clusters = self.clusters()?;
            let cluster = clusters.get(cluster_index).ok_or_else(|| {
                TimelineError::InvalidData(format!(
                    "cluster index {cluster_index} is out of range ({} clusters)",
                    clusters.len()
                ))
            })?;
            if cluster.is_single() {
                Selection::Single(cluster.first_time())
            } else {
                Selection::Multi(build_cluster_detail(
                    cluster_index,
                    cluster,
                    &self.config.markers,
                )?)
            }
        };

        let detail = match selection {
            Selection::Single(time) => {
                self.change_and_commit(time)?;
                return Ok(MarkerActivation::Committed { time });
            }
            Selection::Multi(detail) => detail,
        };

        self.close_detail();
        let rows = detail.rows.len();
        debug!(cluster_index, rows, "opening cluster detail");
        self.detail = Some(detail);
        self.emit_event(TimelineEvent::ClusterDetailOpened {
            cluster_index,
            rows,
        });
        Ok(MarkerActivation::DetailOpened {
            cluster_index,
            rows,
        })
    }

    /// Activates whichever marker sits under `x`, if any.
    pub fn click_at_pixel(&mut self, x: f64) -> TimelineResult<Option<MarkerActivation>> {
        let x = validate_finite(x, "click coordinate")?;
        let markers = self.markers()?;
        match find_marker_at(&markers, x) {
            Some(index) => self.click_marker(markers[index].cluster_index).map(Some),
            None => Ok(None),
        }
    }

    /// Commits the time of one row of the open detail list and closes it.
    pub fn select_detail_item(&mut self, row: usize) -> TimelineResult<f64> {
        let detail = self.detail.as_ref().ok_or_else(|| {
            TimelineError::InvalidData("no cluster detail is open".to_owned())
        })?;
        let time = detail.rows.get(row).map(|entry| entry.time).ok_or_else(|| {
            TimelineError::InvalidData(format!(
                "detail row {row} is out of range ({} rows)",
                detail.rows.len()
            ))
        })?;

        self.change_and_commit(time)?;
        self.close_detail();
        Ok(time)
    }

    /// Closes the detail list without committing. Returns `true` when one was open.
    pub fn close_detail(&mut self) -> bool {
        if self.detail.take().is_none() {
            return false;
        }
        self.emit_event(TimelineEvent::ClusterDetailClosed);
        true
    }

    /// Externally driven seek (player progress, calendar picker).
    ///
    /// Moves the cursor and the window but never emits `TimeChanging` or
    /// `TimeCommitted`, so the caller is not echoed back its own command.
    pub fn seek_to(&mut self, time: f64) -> TimelineResult<()> {
        let time = validate_finite(time, "seek time")?;
        self.cursor.on_commit(time);
        self.emit_event(TimelineEvent::CursorSynced { time });
        self.follow_cursor()
    }

    fn change_and_commit(&mut self, time: f64) -> TimelineResult<()> {
        self.cursor.on_commit(time);
        self.emit_event(TimelineEvent::TimeChanging { time });
        self.emit_event(TimelineEvent::TimeCommitted { time });
        self.follow_cursor()
    }
}
