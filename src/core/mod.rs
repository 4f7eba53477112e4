pub mod cluster;
pub mod event;
pub mod primitives;
pub mod time_span;
pub mod viewport;

pub use cluster::{ClusterConfig, DEFAULT_CLUSTER_THRESHOLD_PX, EventCluster, cluster_events};
pub use event::{Event, EventLevel, RawEvent, RawEventTime, SanitizedEvents, sanitize_events};
pub use primitives::{
    DEFAULT_TIME_LABEL_FORMAT, datetime_to_unix_millis, format_time_label,
    unix_millis_to_datetime, validate_time_label_format,
};
pub use time_span::TimeSpan;
pub use viewport::Viewport;
