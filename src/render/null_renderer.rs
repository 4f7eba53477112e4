use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineFrame};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frames so invalid marker geometry is caught without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_marker_count: usize,
    pub last_cursor_x: Option<f64>,
    pub last_detail_rows: Option<usize>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_marker_count = frame.markers.len();
        self.last_cursor_x = frame.cursor_x;
        self.last_detail_rows = frame.detail.as_ref().map(|detail| detail.rows.len());
        Ok(())
    }
}
