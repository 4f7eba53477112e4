use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Idle,
    Dragging,
}

/// Input device that started a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragSource {
    Pointer,
    Touch,
}

/// Host hook that installs document-level move/up listeners.
///
/// Listeners must be global so that a release outside the timeline surface
/// still ends the gesture. The returned guard removes them when dropped.
pub trait PointerCapture {
    fn acquire(&mut self) -> CaptureGuard;
}

/// Scoped ownership of installed global listeners.
///
/// Dropping the guard runs the release hook exactly once.
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard for hosts that do not need global listeners.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Capture that installs nothing, used by headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPointerCapture;

impl PointerCapture for NoopPointerCapture {
    fn acquire(&mut self) -> CaptureGuard {
        CaptureGuard::detached()
    }
}

/// One in-flight drag gesture.
#[derive(Debug)]
pub struct DragSession {
    source: DragSource,
    origin_x: f64,
    last_x: f64,
    _capture: CaptureGuard,
}

impl DragSession {
    #[must_use]
    pub fn source(&self) -> DragSource {
        self.source
    }

    #[must_use]
    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    #[must_use]
    pub fn last_x(&self) -> f64 {
        self.last_x
    }
}

/// Idle/Dragging state machine for viewport panning.
///
/// No velocity is tracked: the viewport stops exactly when input stops.
#[derive(Debug, Default)]
pub struct DragState {
    session: Option<DragSession>,
}

impl DragState {
    #[must_use]
    pub fn mode(&self) -> DragMode {
        if self.session.is_some() {
            DragMode::Dragging
        } else {
            DragMode::Idle
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Enters Dragging. Returns `false` when a gesture is already active.
    pub fn on_drag_start(&mut self, source: DragSource, x: f64, capture: CaptureGuard) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            source,
            origin_x: x,
            last_x: x,
            _capture: capture,
        });
        true
    }

    /// Records a new coordinate and returns the delta from the previous one.
    pub fn on_drag_move(&mut self, x: f64) -> Option<f64> {
        let session = self.session.as_mut()?;
        let delta = x - session.last_x;
        session.last_x = x;
        Some(delta)
    }

    /// Leaves Dragging, dropping the capture guard.
    pub fn on_drag_end(&mut self) -> Option<DragSource> {
        self.session.take().map(|session| session.source)
    }
}

/// Playback position seen by the scrubber.
///
/// `committed` drives the player; `pending` is an in-progress scrub value that
/// only moves the visual cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    committed: f64,
    pending: Option<f64>,
}

impl CursorState {
    #[must_use]
    pub fn new(committed: f64) -> Self {
        Self {
            committed,
            pending: None,
        }
    }

    #[must_use]
    pub fn committed(self) -> f64 {
        self.committed
    }

    #[must_use]
    pub fn pending(self) -> Option<f64> {
        self.pending
    }

    #[must_use]
    pub fn is_scrubbing(self) -> bool {
        self.pending.is_some()
    }

    /// Position the visual cursor should show.
    #[must_use]
    pub fn displayed(self) -> f64 {
        self.pending.unwrap_or(self.committed)
    }

    pub fn on_change(&mut self, time: f64) {
        self.pending = Some(time);
    }

    pub fn on_commit(&mut self, time: f64) {
        self.committed = time;
        self.pending = None;
    }
}
