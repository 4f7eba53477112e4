use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::{CursorState, DragMode, DragSource};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub viewport: Viewport,
    pub container_width_px: f64,
    pub events_len: usize,
    pub cursor: CursorState,
    pub drag_mode: DragMode,
}

/// Outbound notifications emitted by the timeline engine.
///
/// `TimeChanging` fires continuously while the user scrubs; `TimeCommitted`
/// fires once per finalized selection. Externally driven seeks only produce
/// `CursorSynced`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    EventsUpdated { events_len: usize },
    ViewportChanged { min: f64, max: f64 },
    DragStarted { source: DragSource },
    DragEnded { source: DragSource },
    TimeChanging { time: f64 },
    TimeCommitted { time: f64 },
    CursorSynced { time: f64 },
    ClusterDetailOpened { cluster_index: usize, rows: usize },
    ClusterDetailClosed,
    Rendered,
}

/// Hook interface for players and other collaborators.
///
/// Observers see events and context without reaching into engine internals.
pub trait TimelineObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}

type TimeCallback = Box<dyn FnMut(f64)>;

/// Observer that forwards the scrub channels to plain callbacks, matching the
/// `onTimeChange` / `onTimeCommit` shape players expect.
pub struct TimeCallbacks {
    id: String,
    on_time_change: Option<TimeCallback>,
    on_time_commit: Option<TimeCallback>,
}

impl TimeCallbacks {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            on_time_change: None,
            on_time_commit: None,
        }
    }

    #[must_use]
    pub fn on_time_change(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_time_change = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_time_commit(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_time_commit = Some(Box::new(callback));
        self
    }
}

impl TimelineObserver for TimeCallbacks {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: TimelineEvent, _context: TimelineContext) {
        match event {
            TimelineEvent::TimeChanging { time } => {
                if let Some(callback) = self.on_time_change.as_mut() {
                    callback(time);
                }
            }
            TimelineEvent::TimeCommitted { time } => {
                if let Some(callback) = self.on_time_commit.as_mut() {
                    callback(time);
                }
            }
            _ => {}
        }
    }
}
