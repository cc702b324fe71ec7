//! Integration events — cross-context notifications published after
//! persistence.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::DomainError;

/// A coarse event describing the net effect of a command, published by the
/// command handler layer (never by an aggregate) once the write transaction
/// is assumed durable.
#[derive(Debug, Clone)]
pub struct IntegrationEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Concrete event tag used for handler routing.
    pub event_type: &'static str,
    /// The entity the net effect applies to.
    pub aggregate_id: Uuid,
    /// Minimal payload; consumers are expected to re-query the read side.
    pub payload: serde_json::Value,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent {
    /// Builds an integration event with a fresh event ID.
    #[must_use]
    pub fn new(
        event_type: &'static str,
        aggregate_id: Uuid,
        payload: serde_json::Value,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type,
            aggregate_id,
            payload,
            occurred_at,
        }
    }
}

/// A cross-context listener for integration events.
#[async_trait]
pub trait IntegrationEventHandler: Send + Sync {
    /// The event tags this handler is registered for.
    fn subscribed_to(&self) -> &'static [&'static str];

    /// Reacts to a single integration event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` on failure; the integration bus logs and
    /// swallows it — a best-effort consumer must never fail the triggering
    /// write.
    async fn handle(
        &self,
        ctx: &RequestContext,
        event: &IntegrationEvent,
    ) -> Result<(), DomainError>;
}

/// Fan-out service the command handler layer hands its integration batches
/// to. Fire-and-forget from the command's perspective.
#[async_trait]
pub trait IntegrationEventPublisher: Send + Sync {
    /// Publishes a batch of integration events.
    async fn execute(&self, ctx: &RequestContext, events: &[IntegrationEvent]);
}

/// In-process integration bus backed by the same explicit-registry shape as
/// the domain bus. Unlike the domain bus, every handler failure is caught,
/// logged, and swallowed here.
#[derive(Default)]
pub struct IntegrationEventBus {
    handlers: HashMap<&'static str, Vec<Arc<dyn IntegrationEventHandler>>>,
}

impl IntegrationEventBus {
    /// Creates a bus with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under every tag it subscribes to.
    pub fn register(&mut self, handler: Arc<dyn IntegrationEventHandler>) {
        for tag in handler.subscribed_to() {
            self.handlers
                .entry(tag)
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[async_trait]
impl IntegrationEventPublisher for IntegrationEventBus {
    async fn execute(&self, ctx: &RequestContext, events: &[IntegrationEvent]) {
        for event in events {
            let Some(handlers) = self.handlers.get(event.event_type) else {
                continue;
            };
            for handler in handlers {
                if let Err(err) = handler.handle(ctx, event).await {
                    tracing::warn!(
                        event_type = event.event_type,
                        aggregate_id = %event.aggregate_id,
                        correlation_id = %ctx.correlation_id,
                        error = %err,
                        "integration event handler failed; skipping"
                    );
                }
            }
        }
    }
}
