mod frame;
mod markers;
mod null_renderer;
mod primitives;

pub use frame::TimelineFrame;
pub use markers::{
    ClusterDetail, ClusterMarker, DetailRow, MarkerKind, MarkerLayoutConfig, build_cluster_detail,
    find_marker_at, layout_cluster_markers,
};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, ERROR_COLOR, INFO_COLOR, VERBOSE_COLOR, WARNING_COLOR, level_color,
};

use crate::error::TimelineResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully laid out `TimelineFrame`, keeping drawing code
/// isolated from clustering and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()>;
}
