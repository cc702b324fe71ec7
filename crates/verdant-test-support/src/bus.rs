//! Recording bus doubles.

use std::sync::Mutex;

use async_trait::async_trait;

use verdant_core::bus::EventBus;
use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::event::DomainEvent;
use verdant_core::integration::{IntegrationEvent, IntegrationEventPublisher};

use crate::call_log::CallLog;

/// An event bus that records every published event (and its position in the
/// shared call log) without dispatching to any handler. Always succeeds.
#[derive(Debug)]
pub struct RecordingEventBus {
    log: CallLog,
    published: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventBus {
    /// Creates a recording bus writing order entries into `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every event published so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn published(&self) -> Vec<DomainEvent> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventBus for RecordingEventBus {
    async fn publish(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError> {
        self.publish_all(ctx, std::slice::from_ref(event)).await
    }

    async fn publish_all(
        &self,
        _ctx: &RequestContext,
        events: &[DomainEvent],
    ) -> Result<(), DomainError> {
        for event in events {
            self.log.record(format!("publish:{}", event.event_type));
            self.published.lock().unwrap().push(event.clone());
        }
        Ok(())
    }
}

/// An integration publisher that captures batches instead of fanning them
/// out.
#[derive(Debug)]
pub struct RecordingIntegrationPublisher {
    log: CallLog,
    batches: Mutex<Vec<Vec<IntegrationEvent>>>,
}

impl RecordingIntegrationPublisher {
    /// Creates a recording publisher writing order entries into `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every batch received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn batches(&self) -> Vec<Vec<IntegrationEvent>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntegrationEventPublisher for RecordingIntegrationPublisher {
    async fn execute(&self, _ctx: &RequestContext, events: &[IntegrationEvent]) {
        for event in events {
            self.log.record(format!("integration:{}", event.event_type));
        }
        self.batches.lock().unwrap().push(events.to_vec());
    }
}
