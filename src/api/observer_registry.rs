use crate::error::{TimelineError, TimelineResult};
use crate::extensions::TimelineObserver;
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Registers an observer under its unique identifier.
    ///
    /// Observers are notified in registration order.
    pub fn register_observer(&mut self, observer: Box<dyn TimelineObserver>) -> TimelineResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(TimelineError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&observer_id) {
            return Err(TimelineError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.shift_remove(observer_id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.contains_key(observer_id)
    }
}
