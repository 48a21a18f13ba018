//! Core aggregate and domain event traits.

use serde::{Serialize, de::DeserializeOwned};
use state_store::Revision;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name, used for logging and metrics labels.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates persisted as a single state document.
///
/// Commands are decided against the current state and produce events;
/// events are then applied to produce the next state, which is written back
/// whole. An aggregate is never partially persisted.
pub trait Aggregate: Default + Serialize + DeserializeOwned + Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The type of errors this aggregate can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the default name of the document holding this aggregate.
    fn document_name() -> &'static str;

    /// Returns the revision of the document this state was loaded from.
    ///
    /// `Revision::initial()` for a state that has never been stored.
    fn revision(&self) -> Revision;

    /// Sets the revision. Called by the command handler after load and put.
    fn set_revision(&mut self, revision: Revision);

    /// Applies an event to the aggregate, updating its state.
    ///
    /// This method must be pure and deterministic:
    /// - Given the same state and event, it must always produce the same new state
    /// - It must not have side effects
    /// - It must not fail (events represent facts that have happened)
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}
