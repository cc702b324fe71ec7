//! Read-model projections for the Plants context.

use std::sync::Arc;

use async_trait::async_trait;

use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::event::{DomainEvent, EventHandler};
use verdant_core::repository::ReadRepository;

use crate::domain::aggregates::PlantPrimitives;
use crate::domain::events::{
    PLANT_CREATED, PLANT_DELETED, PLANT_STATUS_CHANGED, PLANT_TRANSPLANTED, PLANT_UPDATED,
};

use super::view_models::PlantView;

/// Primary projection: keeps the plant view collection in sync with the
/// aggregate by applying the event payload directly. Errors propagate.
pub struct PlantProjector {
    views: Arc<dyn ReadRepository<PlantView>>,
}

impl PlantProjector {
    /// Creates a projector writing into the given read repository.
    #[must_use]
    pub fn new(views: Arc<dyn ReadRepository<PlantView>>) -> Self {
        Self { views }
    }
}

#[async_trait]
impl EventHandler for PlantProjector {
    fn subscribed_to(&self) -> &'static [&'static str] {
        &[
            PLANT_CREATED,
            PLANT_UPDATED,
            PLANT_STATUS_CHANGED,
            PLANT_TRANSPLANTED,
            PLANT_DELETED,
        ]
    }

    async fn handle(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError> {
        if event.event_type == PLANT_DELETED {
            return self.views.delete(ctx, event.aggregate_id).await;
        }

        let primitives: PlantPrimitives = serde_json::from_value(event.payload.clone())
            .map_err(|e| DomainError::Projection(format!("malformed plant payload: {e}")))?;

        let view = PlantView {
            id: primitives.id,
            name: primitives.name,
            species: primitives.species,
            status: primitives.status.as_str().to_owned(),
            growing_unit_id: primitives.growing_unit_id,
            notes: primitives.notes,
            planted_at: primitives.planted_at,
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

    use crate::application::view_models::PlantView;
    use crate::domain::aggregates::{PLANT_AGGREGATE_TYPE, PlantPrimitives, PlantStatus};
    use crate::domain::events::{PLANT_CREATED, PLANT_DELETED, PLANT_TRANSPLANTED};

    use super::PlantProjector;

    fn primitives() -> PlantPrimitives {
        PlantPrimitives {
            id: Uuid::new_v4(),
            name: "basil".into(),
            species: "Ocimum basilicum".into(),
            status: PlantStatus::Seedling,
            growing_unit_id: Uuid::new_v4(),
            notes: None,
            planted_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    fn event(tag: &'static str, primitives: &PlantPrimitives) -> DomainEvent {
        DomainEvent::new(
            primitives.id,
            PLANT_AGGREGATE_TYPE,
            tag,
            serde_json::to_value(primitives).unwrap(),
            primitives.planted_at,
        )
    }

    #[tokio::test]
    async fn test_created_event_projects_a_view_with_null_optionals() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<PlantView>> = Arc::new(InMemoryReadStore::new());
        let projector = PlantProjector::new(Arc::clone(&views));

        let primitives = primitives();
        projector
            .handle(&ctx, &event(PLANT_CREATED, &primitives))
            .await
            .unwrap();

        let view = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();
        assert_eq!(view.id, primitives.id);
        assert_eq!(view.status, "seedling");
        assert!(view.notes.is_none());
    }

    #[tokio::test]
    async fn test_transplanted_event_repoints_the_unit_reference() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<PlantView>> = Arc::new(InMemoryReadStore::new());
        let projector = PlantProjector::new(Arc::clone(&views));

        let mut primitives = primitives();
        projector
            .handle(&ctx, &event(PLANT_CREATED, &primitives))
            .await
            .unwrap();

        let target = Uuid::new_v4();
        primitives.growing_unit_id = target;
        projector
            .handle(&ctx, &event(PLANT_TRANSPLANTED, &primitives))
            .await
            .unwrap();

        let view = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();
        assert_eq!(view.growing_unit_id, target);
    }

    #[tokio::test]
    async fn test_deleted_event_removes_the_view() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<PlantView>> = Arc::new(InMemoryReadStore::new());
        let projector = PlantProjector::new(Arc::clone(&views));

        let primitives = primitives();
        projector
            .handle(&ctx, &event(PLANT_CREATED, &primitives))
            .await
            .unwrap();
        projector
            .handle(&ctx, &event(PLANT_DELETED, &primitives))
            .await
            .unwrap();

        assert!(views.find_by_id(&ctx, primitives.id).await.unwrap().is_none());
    }
}
