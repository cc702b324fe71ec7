//! Best-effort recompute trigger for the overview snapshot.

use std::sync::Arc;

use async_trait::async_trait;

use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::integration::{IntegrationEvent, IntegrationEventHandler};

use verdant_growing_units::application::integration_events as unit_events;
use verdant_plants::application::integration_events as plant_events;

use crate::service::OverviewService;

/// Every plant/growing-unit integration event triggers a full recompute of
/// the snapshot; there is no incremental path.
const SUBSCRIPTIONS: &[&str] = &[
    plant_events::PLANT_CREATED,
    plant_events::PLANT_UPDATED,
    plant_events::PLANT_DELETED,
    unit_events::GROWING_UNIT_CREATED,
    unit_events::GROWING_UNIT_UPDATED,
    unit_events::GROWING_UNIT_DELETED,
];

/// Integration-event handler driving the overview recompute.
///
/// Strictly best-effort: every failure is caught, logged, and swallowed. A
/// missed recompute leaves the snapshot stale until the next qualifying
/// event; it must never fail the write that triggered it.
pub struct OverviewProjector {
    service: Arc<OverviewService>,
}

impl OverviewProjector {
    /// Creates the projector around the aggregation service.
    #[must_use]
    pub fn new(service: Arc<OverviewService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl IntegrationEventHandler for OverviewProjector {
    fn subscribed_to(&self) -> &'static [&'static str] {
        SUBSCRIPTIONS
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        event: &IntegrationEvent,
    ) -> Result<(), DomainError> {
        if let Err(err) = self.service.recompute(ctx).await {
            tracing::warn!(
                trigger = event.event_type,
                correlation_id = %ctx.correlation_id,
                error = %err,
                "overview recompute failed; snapshot left stale"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use verdant_core::context::RequestContext;
    use verdant_core::integration::{IntegrationEvent, IntegrationEventHandler};
    use verdant_store::InMemoryReadStore;
    use verdant_test_support::{FailingReadRepository, FixedClock};

    use crate::service::OverviewService;

    use super::OverviewProjector;

    #[tokio::test]
    async fn test_a_failing_recompute_is_swallowed() {
        let snapshots: Arc<InMemoryReadStore<crate::view_models::OverviewSnapshot>> =
            Arc::new(InMemoryReadStore::new());
        let service = OverviewService::new(
            Arc::new(FailingReadRepository),
            snapshots,
            Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            )),
            10,
        );
        let projector = OverviewProjector::new(Arc::new(service));

        let event = IntegrationEvent::new(
            "plant.updated",
            Uuid::new_v4(),
            serde_json::Value::Null,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );

        // The unit-store fetch fails, but the handler must still return Ok.
        let result = projector.handle(&RequestContext::new(), &event).await;
        assert!(result.is_ok());
    }
}
