//! Aggregate root abstraction and the uncommitted-event buffer.

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Ordered buffer of events an aggregate has emitted since its last commit.
///
/// The buffer reflects exactly the mutations applied since the last
/// `clear()`; it is never partially cleared.
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    events: Vec<DomainEvent>,
}

impl EventBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event in emission order.
    pub fn record(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    /// Returns the buffered events in emission order, without mutating them.
    #[must_use]
    pub fn as_slice(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Trait for aggregate roots that buffer domain events from their own
/// mutations.
pub trait AggregateRoot: Send + Sync {
    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the type tag stamped onto this aggregate's events.
    fn aggregate_type(&self) -> &'static str;

    /// Returns the not-yet-published events, in emission order.
    fn uncommitted_events(&self) -> &[DomainEvent];

    /// Empties the event buffer.
    ///
    /// Publication to any bus is the caller's responsibility, not the
    /// aggregate's; callers commit only after a successful dispatch.
    fn commit(&mut self);
}

/// Conversion between an aggregate and its primitive representation.
///
/// `from_primitives` is the hydration path used when loading from the write
/// store: it re-validates invariants but never emits events.
pub trait Persistable: AggregateRoot + Sized {
    /// The primitive (serializable) representation of this aggregate.
    type Primitives: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Returns the aggregate's current state as primitives.
    fn to_primitives(&self) -> Self::Primitives;

    /// Rebuilds an aggregate from stored primitives, with an empty event
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the stored primitives violate an
    /// invariant.
    fn from_primitives(primitives: Self::Primitives) -> Result<Self, DomainError>;
}
