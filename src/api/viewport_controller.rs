use tracing::trace;

use crate::core::{EventCluster, Viewport, cluster_events};
use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;
use crate::render::{ClusterMarker, Renderer, layout_cluster_markers};

use super::TimelineEngine;
use super::validation::{validate_container_width, validate_finite};

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn container_width_px(&self) -> f64 {
        self.container_width_px
    }

    /// Updates the measured container width. `0` means "not laid out yet".
    pub fn set_container_width(&mut self, width_px: f64) -> TimelineResult<()> {
        self.container_width_px = validate_container_width(width_px)?;
        Ok(())
    }

    /// Replaces the visible window, e.g. after a host-side zoom.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.replace_viewport(viewport);
    }

    /// Translates the window by a pixel delta; positive moves forward in time.
    ///
    /// Does nothing until the container has a width.
    pub fn pan_viewport(&mut self, delta_px: f64) -> TimelineResult<()> {
        validate_finite(delta_px, "pan delta")?;
        if !self.has_layout() {
            trace!(delta_px, "ignoring pan before layout");
            return Ok(());
        }
        let next = self.viewport.pan(delta_px, self.container_width_px)?;
        trace!(delta_px, min = next.min(), max = next.max(), "viewport panned");
        self.replace_viewport(next);
        Ok(())
    }

    #[must_use]
    pub fn time_to_pixel(&self, time: f64) -> Option<f64> {
        (self.has_layout() && time.is_finite())
            .then(|| self.viewport.time_to_pixel(time, self.container_width_px))
    }

    pub fn pixel_to_time(&self, x: f64) -> TimelineResult<f64> {
        let width = self.require_layout("pixel to time mapping")?;
        self.viewport.pixel_to_time(x, width)
    }

    /// Clusters the fetched events against the current window and width.
    pub fn clusters(&self) -> TimelineResult<Vec<EventCluster<'_>>> {
        cluster_events(
            &self.events,
            self.viewport,
            self.container_width_px,
            self.config.cluster,
        )
    }

    pub fn markers(&self) -> TimelineResult<Vec<ClusterMarker>> {
        let clusters = self.clusters()?;
        layout_cluster_markers(
            &clusters,
            self.viewport,
            self.container_width_px,
            &self.config.markers,
        )
    }

    /// Applies the follow rule for the displayed cursor.
    pub(super) fn follow_cursor(&mut self) -> TimelineResult<()> {
        let cursor = validate_finite(self.cursor.displayed(), "cursor")?;
        let next = self
            .viewport
            .advance(cursor, self.config.follow_margin_ratio)?;
        self.replace_viewport(next);
        Ok(())
    }

    /// Places a fresh window around the displayed cursor using the configured lead.
    pub(super) fn reset_viewport_around_cursor(&mut self) -> TimelineResult<()> {
        let next = Viewport::with_lead(
            self.cursor.displayed(),
            self.config.follow_span_ms(),
            self.config.follow_lead_ms(),
        )?;
        self.replace_viewport(next);
        Ok(())
    }

    fn replace_viewport(&mut self, next: Viewport) {
        if next == self.viewport {
            return;
        }
        self.viewport = next;
        self.emit_event(TimelineEvent::ViewportChanged {
            min: next.min(),
            max: next.max(),
        });
    }
}
