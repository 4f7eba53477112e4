//! Collaborator hooks live here.
//!
//! Observers receive engine notifications but never mutate engine state.

pub mod observers;

pub use observers::{TimeCallbacks, TimelineContext, TimelineEvent, TimelineObserver};
