use tracing::debug;

use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;
use crate::interaction::{DragMode, DragSource};
use crate::render::Renderer;

use super::TimelineEngine;
use super::validation::validate_finite;

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag.mode()
    }

    /// Pointer pressed at `x` (container-relative pixels).
    ///
    /// Starts a drag when `x` is inside the laid out surface and no gesture is
    /// active. Returns whether a drag started.
    pub fn pointer_down(&mut self, x: f64) -> TimelineResult<bool> {
        self.drag_start(DragSource::Pointer, x)
    }

    pub fn touch_start(&mut self, x: f64) -> TimelineResult<bool> {
        self.drag_start(DragSource::Touch, x)
    }

    /// Pointer moved anywhere in the document while dragging.
    pub fn pointer_move(&mut self, x: f64) -> TimelineResult<()> {
        self.drag_move(x)
    }

    pub fn touch_move(&mut self, x: f64) -> TimelineResult<()> {
        self.drag_move(x)
    }

    /// Pointer released anywhere in the document.
    pub fn pointer_up(&mut self) {
        self.drag_end();
    }

    pub fn touch_end(&mut self) {
        self.drag_end();
    }

    /// Gesture aborted by the platform (lost focus, cancelled touch).
    pub fn pointer_cancel(&mut self) {
        self.drag_end();
    }

    fn drag_start(&mut self, source: DragSource, x: f64) -> TimelineResult<bool> {
        let x = validate_finite(x, "pointer coordinate")?;
        if self.drag.mode() == DragMode::Dragging {
            return Ok(false);
        }
        if !self.has_layout() || !(0.0..=self.container_width_px).contains(&x) {
            return Ok(false);
        }

        let capture = self.pointer_capture.acquire();
        if !self.drag.on_drag_start(source, x, capture) {
            return Ok(false);
        }
        debug!(?source, x, "timeline drag started");
        self.emit_event(TimelineEvent::DragStarted { source });
        Ok(true)
    }

    fn drag_move(&mut self, x: f64) -> TimelineResult<()> {
        let x = validate_finite(x, "pointer coordinate")?;
        let Some(delta_px) = self.drag.on_drag_move(x) else {
            return Ok(());
        };
        if delta_px == 0.0 {
            return Ok(());
        }
        self.pan_viewport(delta_px)
    }

    fn drag_end(&mut self) {
        if let Some(source) = self.drag.on_drag_end() {
            debug!(?source, "timeline drag ended");
            self.emit_event(TimelineEvent::DragEnded { source });
        }
    }
}
