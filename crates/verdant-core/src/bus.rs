//! In-process domain event bus.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::aggregate::AggregateRoot;
use crate::context::RequestContext;
use crate::error::DomainError;
use crate::event::{DomainEvent, EventHandler};

/// Polymorphic dispatcher: given an event, invokes every handler registered
/// for that event's tag.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Dispatches a single event to its registered handlers.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure, after every registered handler has
    /// been invoked.
    async fn publish(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError>;

    /// Dispatches a batch of events, in array order.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure, after every event has been offered
    /// to its handlers.
    async fn publish_all(
        &self,
        ctx: &RequestContext,
        events: &[DomainEvent],
    ) -> Result<(), DomainError>;
}

/// Synchronous, in-process bus backed by an explicit registry.
///
/// The registry maps event tags to ordered handler lists and is populated by
/// `register` calls at process start; nothing is discovered by scanning.
/// Dispatch awaits each handler to completion before invoking the next, so
/// handlers for one tag run in registration order and events in one
/// `publish_all` run in array order. There is no queue, no retry, and no
/// persistence of the event itself: a crash between write-store persistence
/// and dispatch loses the events, and the read model drifts until the next
/// write to the same aggregate.
#[derive(Default)]
pub struct InProcessEventBus {
    handlers: HashMap<&'static str, Vec<Arc<dyn EventHandler>>>,
}

impl InProcessEventBus {
    /// Creates a bus with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under every tag it subscribes to.
    ///
    /// Handlers registered first are invoked first.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        for tag in handler.subscribed_to() {
            self.handlers
                .entry(tag)
                .or_default()
                .push(Arc::clone(&handler));
        }
    }

    /// Number of handlers registered for a tag.
    #[must_use]
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.get(event_type).map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventBus for InProcessEventBus {
    async fn publish(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError> {
        let Some(handlers) = self.handlers.get(event.event_type) else {
            return Ok(());
        };

        // A failing handler must not starve the handlers after it; the first
        // failure is reported once the sweep completes.
        let mut first_failure = None;
        for handler in handlers {
            if let Err(err) = handler.handle(ctx, event).await {
                tracing::error!(
                    event_type = event.event_type,
                    aggregate_id = %event.aggregate_id,
                    correlation_id = %ctx.correlation_id,
                    error = %err,
                    "projection handler failed"
                );
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }

        first_failure.map_or(Ok(()), Err)
    }

    async fn publish_all(
        &self,
        ctx: &RequestContext,
        events: &[DomainEvent],
    ) -> Result<(), DomainError> {
        let mut first_failure = None;
        for event in events {
            if let Err(err) = self.publish(ctx, event).await {
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }

        first_failure.map_or(Ok(()), Err)
    }
}

/// Dispatches an aggregate's uncommitted events, then commits its buffer.
///
/// Publish-before-commit is required: committing first would lose the events.
/// The command's own result is unaffected by a dispatch failure — the write
/// is already durable at this point — so failures are logged and swallowed
/// here, and the buffer is left intact (the aggregate instance is about to be
/// dropped either way; nothing replays it).
pub async fn dispatch_and_commit<A: AggregateRoot>(
    ctx: &RequestContext,
    bus: &dyn EventBus,
    aggregate: &mut A,
) {
    match bus.publish_all(ctx, aggregate.uncommitted_events()).await {
        Ok(()) => aggregate.commit(),
        Err(err) => tracing::error!(
            aggregate_type = aggregate.aggregate_type(),
            aggregate_id = %aggregate.aggregate_id(),
            correlation_id = %ctx.correlation_id,
            error = %err,
            "domain event dispatch failed; read model may be stale until the next write"
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use super::{EventBus, InProcessEventBus};
    use crate::context::RequestContext;
    use crate::error::DomainError;
    use crate::event::{DomainEvent, EventHandler};

    struct ProbeHandler {
        name: &'static str,
        tags: &'static [&'static str],
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventHandler for ProbeHandler {
        fn subscribed_to(&self) -> &'static [&'static str] {
            self.tags
        }

        async fn handle(
            &self,
            _ctx: &RequestContext,
            event: &DomainEvent,
        ) -> Result<(), DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, event.event_type));
            if self.fail {
                return Err(DomainError::Projection("probe failure".into()));
            }
            Ok(())
        }
    }

    fn event(tag: &'static str) -> DomainEvent {
        DomainEvent::new(
            Uuid::new_v4(),
            "Test",
            tag,
            serde_json::Value::Null,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_handlers_invoked_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = InProcessEventBus::new();
        bus.register(Arc::new(ProbeHandler {
            name: "first",
            tags: &["test.ping"],
            calls: Arc::clone(&calls),
            fail: false,
        }));
        bus.register(Arc::new(ProbeHandler {
            name: "second",
            tags: &["test.ping"],
            calls: Arc::clone(&calls),
            fail: false,
        }));

        bus.publish(&RequestContext::new(), &event("test.ping"))
            .await
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["first:test.ping", "second:test.ping"]
        );
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_starve_later_handlers() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = InProcessEventBus::new();
        bus.register(Arc::new(ProbeHandler {
            name: "failing",
            tags: &["test.ping"],
            calls: Arc::clone(&calls),
            fail: true,
        }));
        bus.register(Arc::new(ProbeHandler {
            name: "healthy",
            tags: &["test.ping"],
            calls: Arc::clone(&calls),
            fail: false,
        }));

        let result = bus.publish(&RequestContext::new(), &event("test.ping")).await;

        assert!(matches!(result, Err(DomainError::Projection(_))));
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["failing:test.ping", "healthy:test.ping"]
        );
    }

    #[tokio::test]
    async fn test_publish_all_follows_array_order_across_tags() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = InProcessEventBus::new();
        bus.register(Arc::new(ProbeHandler {
            name: "probe",
            tags: &["test.alpha", "test.beta"],
            calls: Arc::clone(&calls),
            fail: false,
        }));

        bus.publish_all(
            &RequestContext::new(),
            &[event("test.beta"), event("test.alpha")],
        )
        .await
        .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["probe:test.beta", "probe:test.alpha"]
        );
    }

    #[tokio::test]
    async fn test_event_without_handlers_is_a_no_op() {
        let bus = InProcessEventBus::new();
        bus.publish(&RequestContext::new(), &event("test.unrouted"))
            .await
            .unwrap();
        assert_eq!(bus.handler_count("test.unrouted"), 0);
    }
}
