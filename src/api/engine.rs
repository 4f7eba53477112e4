use indexmap::IndexMap;

use crate::core::{Event, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{TimelineContext, TimelineEvent, TimelineObserver};
use crate::interaction::{CursorState, DragState, NoopPointerCapture, PointerCapture};
use crate::render::{ClusterDetail, Renderer, TimelineFrame};

use super::TimelineConfig;
use super::validation::validate_finite;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the viewport, the fetched events, the drag and scrub
/// state machines and the renderer. Inbound commands are methods; outbound
/// notifications go to registered observers.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineConfig,
    pub(super) viewport: Viewport,
    pub(super) container_width_px: f64,
    pub(super) events: Vec<Event>,
    pub(super) camera_id: Option<String>,
    pub(super) fetch_sequence: u64,
    pub(super) cursor: CursorState,
    pub(super) drag: DragState,
    pub(super) pointer_capture: Box<dyn PointerCapture>,
    pub(super) detail: Option<ClusterDetail>,
    pub(super) observers: IndexMap<String, Box<dyn TimelineObserver>>,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine whose window starts `follow_lead` before `initial_time`.
    pub fn new(renderer: R, config: TimelineConfig, initial_time: f64) -> TimelineResult<Self> {
        config.validate()?;
        validate_finite(initial_time, "initial time")?;
        let viewport = Viewport::with_lead(
            initial_time,
            config.follow_span_ms(),
            config.follow_lead_ms(),
        )?;

        Ok(Self {
            renderer,
            container_width_px: config.container_width_px,
            config,
            viewport,
            events: Vec::new(),
            camera_id: None,
            fetch_sequence: 0,
            cursor: CursorState::new(initial_time),
            drag: DragState::default(),
            pointer_capture: Box::new(NoopPointerCapture),
            detail: None,
            observers: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Installs the host hook used to capture global pointer listeners while dragging.
    pub fn set_pointer_capture(&mut self, capture: Box<dyn PointerCapture>) {
        self.pointer_capture = capture;
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn camera_id(&self) -> Option<&str> {
        self.camera_id.as_deref()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    #[must_use]
    pub fn detail(&self) -> Option<&ClusterDetail> {
        self.detail.as_ref()
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.emit_event(TimelineEvent::Rendered);
        Ok(())
    }

    pub fn build_frame(&self) -> TimelineResult<TimelineFrame> {
        let markers = self.markers()?;
        let cursor = self.cursor.displayed();
        let cursor_x = (self.has_layout() && self.viewport.contains(cursor))
            .then(|| self.viewport.time_to_pixel(cursor, self.container_width_px));

        Ok(TimelineFrame::new(self.viewport, self.container_width_px)
            .with_cursor_x(cursor_x)
            .with_markers(markers)
            .with_detail(self.detail.clone()))
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn has_layout(&self) -> bool {
        self.container_width_px > 0.0
    }

    pub(super) fn context(&self) -> TimelineContext {
        TimelineContext {
            viewport: self.viewport,
            container_width_px: self.container_width_px,
            events_len: self.events.len(),
            cursor: self.cursor,
            drag_mode: self.drag.mode(),
        }
    }

    pub(super) fn emit_event(&mut self, event: TimelineEvent) {
        let context = self.context();
        for observer in self.observers.values_mut() {
            observer.on_event(event, context);
        }
    }

    pub(super) fn require_layout(&self, action: &str) -> TimelineResult<f64> {
        if !self.has_layout() {
            return Err(TimelineError::InvalidData(format!(
                "{action} requires a laid out container"
            )));
        }
        Ok(self.container_width_px)
    }
}
