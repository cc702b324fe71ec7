//! Command handlers for the Growing Units context.

use uuid::Uuid;

use verdant_core::bus::{EventBus, dispatch_and_commit};
use verdant_core::clock::Clock;
use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::integration::IntegrationEventPublisher;
use verdant_core::query::QueryBus;
use verdant_core::repository::{WriteRepository, require_aggregate};

use crate::domain::aggregates::{GROWING_UNIT_AGGREGATE_TYPE, GrowingUnit};
use crate::domain::commands::{
    CreateGrowingUnit, DeleteGrowingUnit, RelocateGrowingUnit, UpdateGrowingUnit,
};

use super::{integration_events, queries};

/// Fails fast when the referenced location is unknown to the Locations
/// read side.
async fn assert_location_exists(
    ctx: &RequestContext,
    query_bus: &QueryBus,
    location_id: Uuid,
) -> Result<(), DomainError> {
    let result = query_bus
        .execute(ctx, &queries::location_by_id(location_id))
        .await?;
    if result.is_null() {
        return Err(DomainError::NotFound {
            aggregate_type: "Location",
            id: location_id,
        });
    }
    Ok(())
}

/// Handles `CreateGrowingUnit` and returns the new unit's id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the location does not exist, or
/// `DomainError::Validation` for invalid name/capacity/dimensions.
pub async fn create_growing_unit(
    command: &CreateGrowingUnit,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    query_bus: &QueryBus,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<Uuid, DomainError> {
    assert_location_exists(ctx, query_bus, command.location_id).await?;

    let growing_unit_id = Uuid::new_v4();
    let mut unit = GrowingUnit::create(
        growing_unit_id,
        &command.name,
        command.location_id,
        command.kind,
        command.capacity,
        command.dimensions,
        clock,
        true,
    )?;

    repo.save(ctx, &unit).await?;

    dispatch_and_commit(ctx, event_bus, &mut unit).await;
    integration
        .execute(
            ctx,
            &[integration_events::growing_unit_created(
                growing_unit_id,
                clock.now(),
            )],
        )
        .await;

    tracing::info!(%growing_unit_id, correlation_id = %ctx.correlation_id, "growing unit created");
    Ok(growing_unit_id)
}

/// Handles `UpdateGrowingUnit`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the unit does not exist, or
/// `DomainError::Validation` when the new details violate an invariant.
pub async fn update_growing_unit(
    command: &UpdateGrowingUnit,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut unit = require_aggregate(
        repo,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        command.growing_unit_id,
    )
    .await?;

    unit.update_details(
        &command.name,
        command.kind,
        command.capacity,
        command.dimensions,
        clock,
        true,
    )?;

    repo.save(ctx, &unit).await?;

    dispatch_and_commit(ctx, event_bus, &mut unit).await;
    integration
        .execute(
            ctx,
            &[integration_events::growing_unit_updated(
                command.growing_unit_id,
                clock.now(),
            )],
        )
        .await;

    Ok(())
}

/// Handles `RelocateGrowingUnit`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the unit or the destination location
/// does not exist.
pub async fn relocate_growing_unit(
    command: &RelocateGrowingUnit,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    query_bus: &QueryBus,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut unit = require_aggregate(
        repo,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        command.growing_unit_id,
    )
    .await?;
    assert_location_exists(ctx, query_bus, command.location_id).await?;

    unit.relocate(command.location_id, clock, true);
    repo.save(ctx, &unit).await?;

    dispatch_and_commit(ctx, event_bus, &mut unit).await;
    integration
        .execute(
            ctx,
            &[integration_events::growing_unit_updated(
                command.growing_unit_id,
                clock.now(),
            )],
        )
        .await;

    Ok(())
}

/// Handles `DeleteGrowingUnit`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the unit does not exist, or
/// `DomainError::Validation` while it still hosts plants.
pub async fn delete_growing_unit(
    command: &DeleteGrowingUnit,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut unit = require_aggregate(
        repo,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        command.growing_unit_id,
    )
    .await?;

    unit.delete(clock, true)?;
    repo.delete(ctx, command.growing_unit_id).await?;

    dispatch_and_commit(ctx, event_bus, &mut unit).await;
    integration
        .execute(
            ctx,
            &[integration_events::growing_unit_deleted(
                command.growing_unit_id,
                clock.now(),
            )],
        )
        .await;

    tracing::info!(growing_unit_id = %command.growing_unit_id, "growing unit deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    use verdant_core::context::RequestContext;
    use verdant_core::error::DomainError;
    use verdant_core::query::{QueryBus, QueryHandler};
    use verdant_core::repository::WriteRepository;
    use verdant_store::InMemoryWriteStore;
    use verdant_test_support::{CallLog, FixedClock, RecordingEventBus, RecordingIntegrationPublisher};

    use crate::domain::aggregates::{Dimensions, GrowingUnit, UnitKind};
    use crate::domain::commands::{CreateGrowingUnit, DeleteGrowingUnit};

    use super::{create_growing_unit, delete_growing_unit};

    /// Resolves every location id to a minimal location document.
    struct AnyLocationHandler;

    #[async_trait]
    impl QueryHandler for AnyLocationHandler {
        fn query_type(&self) -> &'static str {
            super::queries::LOCATION_BY_ID
        }

        async fn handle(
            &self,
            _ctx: &RequestContext,
            params: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            Ok(json!({ "id": params["location_id"], "name": "stub" }))
        }
    }

    fn query_bus_with_locations() -> QueryBus {
        let mut bus = QueryBus::new();
        bus.register(Arc::new(AnyLocationHandler));
        bus
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_create_growing_unit_persists_and_publishes() {
        let ctx = RequestContext::new();
        let clock = fixed_clock();
        let log = CallLog::new();
        let repo = InMemoryWriteStore::<GrowingUnit>::new();
        let bus = RecordingEventBus::new(log.clone());
        let integration = RecordingIntegrationPublisher::new(log.clone());
        let query_bus = query_bus_with_locations();

        let command = CreateGrowingUnit {
            name: "Bench 1".into(),
            location_id: Uuid::new_v4(),
            kind: UnitKind::Tray,
            capacity: 6,
            dimensions: Dimensions::new(60.0, 40.0, 15.0).unwrap(),
        };
        let unit_id = create_growing_unit(
            &command,
            &ctx,
            &clock,
            &repo,
            &query_bus,
            &bus,
            &integration,
        )
        .await
        .unwrap();

        assert!(repo.find_by_id(&ctx, unit_id).await.unwrap().is_some());
        assert_eq!(bus.published().len(), 1);
        assert_eq!(integration.batches().len(), 1);
    }

    #[tokio::test]
    async fn test_create_growing_unit_rejects_unknown_location() {
        let ctx = RequestContext::new();
        let clock = fixed_clock();
        let log = CallLog::new();
        let repo = InMemoryWriteStore::<GrowingUnit>::new();
        let bus = RecordingEventBus::new(log.clone());
        let integration = RecordingIntegrationPublisher::new(log.clone());

        // A bus serving nulls for every location.
        struct NoLocationHandler;
        #[async_trait]
        impl QueryHandler for NoLocationHandler {
            fn query_type(&self) -> &'static str {
                super::super::queries::LOCATION_BY_ID
            }
            async fn handle(
                &self,
                _ctx: &RequestContext,
                _params: &serde_json::Value,
            ) -> Result<serde_json::Value, DomainError> {
                Ok(serde_json::Value::Null)
            }
        }
        let mut query_bus = QueryBus::new();
        query_bus.register(Arc::new(NoLocationHandler));

        let command = CreateGrowingUnit {
            name: "Bench 1".into(),
            location_id: Uuid::new_v4(),
            kind: UnitKind::Pot,
            capacity: 1,
            dimensions: Dimensions::new(20.0, 20.0, 18.0).unwrap(),
        };
        let result = create_growing_unit(
            &command,
            &ctx,
            &clock,
            &repo,
            &query_bus,
            &bus,
            &integration,
        )
        .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_delete_growing_unit_removes_the_record() {
        let ctx = RequestContext::new();
        let clock = fixed_clock();
        let log = CallLog::new();
        let repo = InMemoryWriteStore::<GrowingUnit>::new();
        let bus = RecordingEventBus::new(log.clone());
        let integration = RecordingIntegrationPublisher::new(log.clone());
        let query_bus = query_bus_with_locations();

        let command = CreateGrowingUnit {
            name: "Bench 1".into(),
            location_id: Uuid::new_v4(),
            kind: UnitKind::Bed,
            capacity: 4,
            dimensions: Dimensions::new(200.0, 100.0, 30.0).unwrap(),
        };
        let unit_id = create_growing_unit(
            &command,
            &ctx,
            &clock,
            &repo,
            &query_bus,
            &bus,
            &integration,
        )
        .await
        .unwrap();

        delete_growing_unit(
            &DeleteGrowingUnit {
                growing_unit_id: unit_id,
            },
            &ctx,
            &clock,
            &repo,
            &bus,
            &integration,
        )
        .await
        .unwrap();

        assert!(repo.find_by_id(&ctx, unit_id).await.unwrap().is_none());
    }
}
