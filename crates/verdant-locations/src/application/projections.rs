//! Read-model projections for the Locations context.

use std::sync::Arc;

use async_trait::async_trait;

use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::event::{DomainEvent, EventHandler};
use verdant_core::repository::ReadRepository;

use crate::domain::aggregates::LocationPrimitives;
use crate::domain::events::{LOCATION_CREATED, LOCATION_DELETED, LOCATION_UPDATED};

use super::view_models::LocationView;

/// Primary projection: keeps the location view collection in sync with the
/// aggregate. Errors propagate — the bus has no recovery path either way,
/// but a failed primary projection is a user-facing inconsistency worth
/// surfacing.
pub struct LocationProjector {
    views: Arc<dyn ReadRepository<LocationView>>,
}

impl LocationProjector {
    /// Creates a projector writing into the given read repository.
    #[must_use]
    pub fn new(views: Arc<dyn ReadRepository<LocationView>>) -> Self {
        Self { views }
    }
}

#[async_trait]
impl EventHandler for LocationProjector {
    fn subscribed_to(&self) -> &'static [&'static str] {
        &[LOCATION_CREATED, LOCATION_UPDATED, LOCATION_DELETED]
    }

    async fn handle(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError> {
        if event.event_type == LOCATION_DELETED {
            return self.views.delete(ctx, event.aggregate_id).await;
        }

        let primitives: LocationPrimitives = serde_json::from_value(event.payload.clone())
            .map_err(|e| DomainError::Projection(format!("malformed location payload: {e}")))?;

        let view = LocationView {
            id: primitives.id,
            name: primitives.name,
            description: primitives.description,
            covered: primitives.covered,
        };
        self.views.save(ctx, &view).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use verdant_core::context::RequestContext;
    use verdant_core::event::{DomainEvent, EventHandler};
    use verdant_core::repository::ReadRepository;
    use verdant_store::InMemoryReadStore;

    use crate::application::view_models::LocationView;
    use crate::domain::aggregates::{LOCATION_AGGREGATE_TYPE, LocationPrimitives};
    use crate::domain::events::{LOCATION_CREATED, LOCATION_DELETED};

    use super::LocationProjector;

    fn created_event(primitives: &LocationPrimitives) -> DomainEvent {
        DomainEvent::new(
            primitives.id,
            LOCATION_AGGREGATE_TYPE,
            LOCATION_CREATED,
            serde_json::to_value(primitives).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_replaying_the_same_event_is_idempotent() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<LocationView>> = Arc::new(InMemoryReadStore::new());
        let projector = LocationProjector::new(Arc::clone(&views));

        let primitives = LocationPrimitives {
            id: Uuid::new_v4(),
            name: "Greenhouse A".into(),
            description: None,
            covered: true,
        };
        let event = created_event(&primitives);

        projector.handle(&ctx, &event).await.unwrap();
        let first = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();

        projector.handle(&ctx, &event).await.unwrap();
        let second = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_deleted_event_removes_the_view() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<LocationView>> = Arc::new(InMemoryReadStore::new());
        let projector = LocationProjector::new(Arc::clone(&views));

        let primitives = LocationPrimitives {
            id: Uuid::new_v4(),
            name: "Old bed".into(),
            description: None,
            covered: false,
        };
        projector
            .handle(&ctx, &created_event(&primitives))
            .await
            .unwrap();

        let deleted = DomainEvent::new(
            primitives.id,
            LOCATION_AGGREGATE_TYPE,
            LOCATION_DELETED,
            serde_json::to_value(&primitives).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap(),
        );
        projector.handle(&ctx, &deleted).await.unwrap();

        assert!(views.find_by_id(&ctx, primitives.id).await.unwrap().is_none());
    }
}
