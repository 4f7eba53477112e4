mod drag_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod event_source;
mod observer_registry;
mod scrub_controller;
mod validation;
mod viewport_controller;

pub use engine::TimelineEngine;
pub use engine_config::{DEFAULT_FOLLOW_MARGIN_RATIO, TimelineConfig};
pub use engine_snapshot::{
    ClusterSummary, TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshot,
    TimelineSnapshotJsonContractV1,
};
pub use event_source::{EventSource, FetchOutcome, FetchTicket, StaticEventSource};
pub use scrub_controller::MarkerActivation;
