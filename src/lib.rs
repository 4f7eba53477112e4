//! capsule-timeline: headless timeline model for camera playback views.
//!
//! The crate clusters timestamped camera events by on-screen distance, keeps a
//! visible time window following the playback cursor, and turns drag, slider
//! and marker input into "changing" and "committed" notifications for a player.
//! Drawing is left to a `render::Renderer` implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
