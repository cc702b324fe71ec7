//! Domain event envelope and handler abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::DomainError;

/// An immutable record of a state change, emitted by an aggregate.
///
/// The payload carries the aggregate's full post-mutation primitives, so a
/// consumer can rebuild a view model without re-querying the write store
/// (re-querying through an application service is also permitted).
#[derive(Debug, Clone)]
pub struct DomainEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// The aggregate this event was emitted by.
    pub aggregate_id: Uuid,
    /// Type tag of the emitting aggregate (e.g. `"Plant"`).
    pub aggregate_type: &'static str,
    /// Concrete event tag used for handler routing (e.g. `"plant.created"`).
    pub event_type: &'static str,
    /// Serialized post-mutation primitives of the aggregate.
    pub payload: serde_json::Value,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Builds an event envelope with a fresh event ID.
    #[must_use]
    pub fn new(
        aggregate_id: Uuid,
        aggregate_type: &'static str,
        event_type: &'static str,
        payload: serde_json::Value,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            aggregate_id,
            aggregate_type,
            event_type,
            payload,
            occurred_at,
        }
    }
}

/// A listener that reacts to domain events, typically by rebuilding a view
/// model in the read store.
///
/// Handlers declare the event tags they react to; the bus registry is built
/// from those declarations by explicit registration calls at process start.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The event tags this handler is registered for.
    fn subscribed_to(&self) -> &'static [&'static str];

    /// Reacts to a single event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the view model cannot be rebuilt or saved.
    /// The bus logs the failure and keeps dispatching to other handlers;
    /// there is no retry behind it.
    async fn handle(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError>;
}
