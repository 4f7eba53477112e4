use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Event, RawEvent, sanitize_events};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::TimelineEvent;
use crate::render::Renderer;

use super::TimelineEngine;
use super::validation::validate_camera_id;

/// Remote collaborator that returns every known event of a camera, unordered.
pub trait EventSource {
    fn fetch_timeline(&mut self, camera_id: &str) -> TimelineResult<Vec<RawEvent>>;
}

/// In-memory event source for fixtures, demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    cameras: HashMap<String, Vec<RawEvent>>,
}

impl StaticEventSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_camera(mut self, camera_id: impl Into<String>, events: Vec<RawEvent>) -> Self {
        self.cameras.insert(camera_id.into(), events);
        self
    }

    /// Loads one camera from a JSON array of raw events.
    pub fn with_camera_json(self, camera_id: impl Into<String>, json: &str) -> TimelineResult<Self> {
        let events: Vec<RawEvent> = serde_json::from_str(json).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline events json: {e}"))
        })?;
        Ok(self.with_camera(camera_id, events))
    }
}

impl EventSource for StaticEventSource {
    fn fetch_timeline(&mut self, camera_id: &str) -> TimelineResult<Vec<RawEvent>> {
        self.cameras
            .get(camera_id)
            .cloned()
            .ok_or_else(|| TimelineError::Fetch {
                camera_id: camera_id.to_owned(),
                message: "unknown camera".to_owned(),
            })
    }
}

/// Identifies one issued fetch. Only the most recent ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    camera_id: String,
    sequence: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    Applied { accepted: usize, dropped: usize },
    /// The fetch failed; the timeline now shows no events.
    Failed,
    /// A newer fetch was issued before this one resolved; result discarded.
    Superseded,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Issues a fetch for `camera_id`.
    ///
    /// Switching cameras clears the events, closes any open detail list and
    /// re-centers the window on the cursor. Refetching the same camera keeps
    /// the last known events visible until the result arrives.
    pub fn begin_fetch(&mut self, camera_id: impl Into<String>) -> TimelineResult<FetchTicket> {
        let camera_id = camera_id.into();
        validate_camera_id(&camera_id)?;

        if self.camera_id.as_deref() != Some(camera_id.as_str()) {
            debug!(camera_id = %camera_id, "switching timeline camera");
            self.camera_id = Some(camera_id.clone());
            self.replace_events(Vec::new());
            self.reset_viewport_around_cursor()?;
        }

        self.fetch_sequence += 1;
        Ok(FetchTicket {
            camera_id,
            sequence: self.fetch_sequence,
        })
    }

    /// Applies a fetch result unless a newer fetch has been issued since.
    ///
    /// An applied result (or a failure) closes any open detail list.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: TimelineResult<Vec<RawEvent>>,
    ) -> FetchOutcome {
        if ticket.sequence != self.fetch_sequence
            || self.camera_id.as_deref() != Some(ticket.camera_id.as_str())
        {
            debug!(
                camera_id = %ticket.camera_id,
                sequence = ticket.sequence,
                latest = self.fetch_sequence,
                "discarding superseded timeline fetch"
            );
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(raw) => {
                let sanitized = sanitize_events(raw);
                let accepted = sanitized.events.len();
                self.replace_events(sanitized.events);
                FetchOutcome::Applied {
                    accepted,
                    dropped: sanitized.dropped,
                }
            }
            Err(err) => {
                warn!(
                    camera_id = %ticket.camera_id,
                    error = %err,
                    "timeline fetch failed; showing an empty timeline"
                );
                self.replace_events(Vec::new());
                FetchOutcome::Failed
            }
        }
    }

    /// Synchronous fetch: begin, call the source, complete.
    pub fn load_camera(
        &mut self,
        source: &mut dyn EventSource,
        camera_id: impl Into<String>,
    ) -> TimelineResult<FetchOutcome> {
        let ticket = self.begin_fetch(camera_id)?;
        let result = source.fetch_timeline(ticket.camera_id());
        Ok(self.complete_fetch(&ticket, result))
    }

    /// Swaps the event set. Any open detail list indexes the old clusters, so
    /// it is closed first.
    fn replace_events(&mut self, events: Vec<Event>) {
        self.close_detail();
        let changed = !(events.is_empty() && self.events.is_empty());
        self.events = events;
        if changed {
            self.emit_event(TimelineEvent::EventsUpdated {
                events_len: self.events.len(),
            });
        }
    }
}
