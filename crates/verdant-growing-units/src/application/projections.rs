//! Read-model projections for the Growing Units context.

use std::sync::Arc;

use async_trait::async_trait;

use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::event::{DomainEvent, EventHandler};
use verdant_core::query::QueryBus;
use verdant_core::repository::ReadRepository;

use crate::domain::aggregates::GrowingUnitPrimitives;
use crate::domain::events::{
    GROWING_UNIT_CREATED, GROWING_UNIT_DELETED, GROWING_UNIT_PLANT_ADDED,
    GROWING_UNIT_PLANT_REMOVED, GROWING_UNIT_UPDATED,
};

use super::queries;
use super::view_models::{GrowingUnitView, PlantSummary};

/// Primary projection: re-derives the full growing-unit view on every unit
/// event, pulling the location name and plant summaries through the query
/// bus, and upserts it. Re-deriving from scratch (rather than patching)
/// keeps replays idempotent.
pub struct GrowingUnitProjector {
    views: Arc<dyn ReadRepository<GrowingUnitView>>,
    query_bus: Arc<QueryBus>,
}

impl GrowingUnitProjector {
    /// Creates a projector writing into the given read repository.
    #[must_use]
    pub fn new(views: Arc<dyn ReadRepository<GrowingUnitView>>, query_bus: Arc<QueryBus>) -> Self {
        Self { views, query_bus }
    }

    async fn location_name(
        &self,
        ctx: &RequestContext,
        location_id: uuid::Uuid,
    ) -> Result<Option<String>, DomainError> {
        let result = self
            .query_bus
            .execute(ctx, &queries::location_by_id(location_id))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let location: queries::LocationRef = serde_json::from_value(result)
            .map_err(|e| DomainError::Projection(format!("malformed location document: {e}")))?;
        Ok(Some(location.name))
    }

    async fn plant_summaries(
        &self,
        ctx: &RequestContext,
        plant_ids: &[uuid::Uuid],
    ) -> Result<Vec<PlantSummary>, DomainError> {
        if plant_ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = self
            .query_bus
            .execute(ctx, &queries::plant_summaries_by_ids(plant_ids))
            .await?;
        serde_json::from_value(result)
            .map_err(|e| DomainError::Projection(format!("malformed plant summaries: {e}")))
    }
}

#[async_trait]
impl EventHandler for GrowingUnitProjector {
    fn subscribed_to(&self) -> &'static [&'static str] {
        &[
            GROWING_UNIT_CREATED,
            GROWING_UNIT_UPDATED,
            GROWING_UNIT_PLANT_ADDED,
            GROWING_UNIT_PLANT_REMOVED,
            GROWING_UNIT_DELETED,
        ]
    }

    async fn handle(&self, ctx: &RequestContext, event: &DomainEvent) -> Result<(), DomainError> {
        if event.event_type == GROWING_UNIT_DELETED {
            return self.views.delete(ctx, event.aggregate_id).await;
        }

        let primitives: GrowingUnitPrimitives = serde_json::from_value(event.payload.clone())
            .map_err(|e| DomainError::Projection(format!("malformed growing unit payload: {e}")))?;

        let location_name = self.location_name(ctx, primitives.location_id).await?;
        let plants = self.plant_summaries(ctx, &primitives.plant_ids).await?;

        let plant_count = u32::try_from(plants.len()).unwrap_or(u32::MAX);
        let view = GrowingUnitView {
            id: primitives.id,
            name: primitives.name,
            location_id: primitives.location_id,
            location_name,
            kind: primitives.kind.as_str().to_owned(),
            capacity: primitives.capacity,
            width_cm: primitives.dimensions.width_cm,
            depth_cm: primitives.dimensions.depth_cm,
            height_cm: primitives.dimensions.height_cm,
            volume_liters: primitives.dimensions.volume_liters(),
            plants,
            plant_count,
            free_capacity: primitives.capacity.saturating_sub(plant_count),
        };
        self.views.save(ctx, &view).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    use verdant_core::context::RequestContext;
    use verdant_core::event::{DomainEvent, EventHandler};
    use verdant_core::query::{QueryBus, QueryHandler};
    use verdant_core::repository::ReadRepository;
    use verdant_store::InMemoryReadStore;

    use crate::domain::aggregates::{
        Dimensions, GROWING_UNIT_AGGREGATE_TYPE, GrowingUnitPrimitives, UnitKind,
    };
    use crate::domain::events::GROWING_UNIT_PLANT_ADDED;

    use super::super::queries;
    use super::super::view_models::GrowingUnitView;
    use super::GrowingUnitProjector;

    struct StubLocationHandler;

    #[async_trait]
    impl QueryHandler for StubLocationHandler {
        fn query_type(&self) -> &'static str {
            queries::LOCATION_BY_ID
        }

        async fn handle(
            &self,
            _ctx: &RequestContext,
            params: &serde_json::Value,
        ) -> Result<serde_json::Value, verdant_core::error::DomainError> {
            Ok(json!({ "id": params["location_id"], "name": "Greenhouse A" }))
        }
    }

    struct StubPlantsHandler;

    #[async_trait]
    impl QueryHandler for StubPlantsHandler {
        fn query_type(&self) -> &'static str {
            queries::PLANT_SUMMARIES_BY_IDS
        }

        async fn handle(
            &self,
            _ctx: &RequestContext,
            params: &serde_json::Value,
        ) -> Result<serde_json::Value, verdant_core::error::DomainError> {
            let ids = params["plant_ids"].as_array().cloned().unwrap_or_default();
            let summaries: Vec<serde_json::Value> = ids
                .iter()
                .map(|id| {
                    json!({
                        "id": id,
                        "name": "basil",
                        "species": "Ocimum basilicum",
                        "status": "growing"
                    })
                })
                .collect();
            Ok(serde_json::Value::Array(summaries))
        }
    }

    fn stub_query_bus() -> Arc<QueryBus> {
        let mut bus = QueryBus::new();
        bus.register(Arc::new(StubLocationHandler));
        bus.register(Arc::new(StubPlantsHandler));
        Arc::new(bus)
    }

    fn plant_added_event(primitives: &GrowingUnitPrimitives) -> DomainEvent {
        DomainEvent::new(
            primitives.id,
            GROWING_UNIT_AGGREGATE_TYPE,
            GROWING_UNIT_PLANT_ADDED,
            serde_json::to_value(primitives).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    fn primitives_with_plants(plant_ids: Vec<Uuid>) -> GrowingUnitPrimitives {
        GrowingUnitPrimitives {
            id: Uuid::new_v4(),
            name: "Bench 1".into(),
            location_id: Uuid::new_v4(),
            kind: UnitKind::Tray,
            capacity: 6,
            dimensions: Dimensions::new(60.0, 40.0, 15.0).unwrap(),
            plant_ids,
        }
    }

    #[tokio::test]
    async fn test_view_nests_location_name_and_plant_summaries() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<GrowingUnitView>> = Arc::new(InMemoryReadStore::new());
        let projector = GrowingUnitProjector::new(Arc::clone(&views), stub_query_bus());

        let primitives = primitives_with_plants(vec![Uuid::new_v4(), Uuid::new_v4()]);
        projector
            .handle(&ctx, &plant_added_event(&primitives))
            .await
            .unwrap();

        let view = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();
        assert_eq!(view.location_name.as_deref(), Some("Greenhouse A"));
        assert_eq!(view.plant_count, 2);
        assert_eq!(view.plants.len(), 2);
        assert_eq!(view.free_capacity, 4);
        assert!((view.volume_liters - 36.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_replaying_the_same_event_is_idempotent() {
        let ctx = RequestContext::new();
        let views: Arc<dyn ReadRepository<GrowingUnitView>> = Arc::new(InMemoryReadStore::new());
        let projector = GrowingUnitProjector::new(Arc::clone(&views), stub_query_bus());

        let primitives = primitives_with_plants(vec![Uuid::new_v4()]);
        let event = plant_added_event(&primitives);

        projector.handle(&ctx, &event).await.unwrap();
        let first = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();

        projector.handle(&ctx, &event).await.unwrap();
        let second = views.find_by_id(&ctx, primitives.id).await.unwrap().unwrap();

        assert_eq!(first, second);
    }
}
