//! Command handlers for the Locations context.
//!
//! Each handler follows the canonical write-pipeline shape: assert-exists,
//! mutate, persist, dispatch-and-commit the buffered domain events, then
//! publish the integration batch. Failures before or during persistence
//! abort the command; anything after is fire-and-forget.

use uuid::Uuid;

use verdant_core::bus::{EventBus, dispatch_and_commit};
use verdant_core::clock::Clock;
use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::integration::IntegrationEventPublisher;
use verdant_core::repository::{WriteRepository, require_aggregate};

use crate::domain::aggregates::{LOCATION_AGGREGATE_TYPE, Location};
use crate::domain::commands::{CreateLocation, DeleteLocation, UpdateLocation};

use super::integration_events;

/// Handles `CreateLocation` and returns the new location's id.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an invalid name, or the
/// repository's error if persistence fails.
pub async fn create_location(
    command: &CreateLocation,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<Location>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<Uuid, DomainError> {
    let location_id = Uuid::new_v4();
    let mut location = Location::create(
        location_id,
        &command.name,
        command.description.clone(),
        command.covered,
        clock,
        true,
    )?;

    repo.save(ctx, &location).await?;

    dispatch_and_commit(ctx, event_bus, &mut location).await;
    integration
        .execute(
            ctx,
            &[integration_events::location_created(location_id, clock.now())],
        )
        .await;

    tracing::info!(%location_id, correlation_id = %ctx.correlation_id, "location created");
    Ok(location_id)
}

/// Handles `UpdateLocation`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the location does not exist, or
/// `DomainError::Validation` for an invalid name.
pub async fn update_location(
    command: &UpdateLocation,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<Location>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut location =
        require_aggregate(repo, ctx, LOCATION_AGGREGATE_TYPE, command.location_id).await?;

    location.update_details(
        &command.name,
        command.description.clone(),
        command.covered,
        clock,
        true,
    )?;

    repo.save(ctx, &location).await?;

    dispatch_and_commit(ctx, event_bus, &mut location).await;
    integration
        .execute(
            ctx,
            &[integration_events::location_updated(
                command.location_id,
                clock.now(),
            )],
        )
        .await;

    Ok(())
}

/// Handles `DeleteLocation`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the location does not exist.
pub async fn delete_location(
    command: &DeleteLocation,
    ctx: &RequestContext,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<Location>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut location =
        require_aggregate(repo, ctx, LOCATION_AGGREGATE_TYPE, command.location_id).await?;

    location.delete(clock, true);
    repo.delete(ctx, command.location_id).await?;

    dispatch_and_commit(ctx, event_bus, &mut location).await;
    integration
        .execute(
            ctx,
            &[integration_events::location_deleted(
                command.location_id,
                clock.now(),
            )],
        )
        .await;

    tracing::info!(location_id = %command.location_id, "location deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use verdant_core::context::RequestContext;
    use verdant_core::error::DomainError;
    use verdant_core::repository::WriteRepository;
    use verdant_store::InMemoryWriteStore;
    use verdant_test_support::{
        CallLog, FixedClock, RecordingEventBus, RecordingIntegrationPublisher,
        RecordingWriteRepository,
    };

    use crate::domain::aggregates::Location;
    use crate::domain::commands::{CreateLocation, DeleteLocation, UpdateLocation};
    use crate::domain::events::{LOCATION_CREATED, LOCATION_DELETED};

    use super::{create_location, delete_location, update_location};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_create_location_saves_before_publishing() {
        let ctx = RequestContext::new();
        let clock = fixed_clock();
        let log = CallLog::new();
        let repo = RecordingWriteRepository::new(
            "location",
            Arc::new(InMemoryWriteStore::<Location>::new()),
            log.clone(),
        );
        let bus = RecordingEventBus::new(log.clone());
        let integration = RecordingIntegrationPublisher::new(log.clone());

        let command = CreateLocation {
            name: "Greenhouse A".into(),
            description: None,
            covered: true,
        };
        let location_id = create_location(&command, &ctx, &clock, &repo, &bus, &integration)
            .await
            .unwrap();

        // save strictly precedes publish, which precedes the integration batch.
        let save_at = log.first_index_of("save:location").unwrap();
        let publish_at = log.first_index_of("publish:").unwrap();
        let integration_at = log.first_index_of("integration:").unwrap();
        assert!(save_at < publish_at);
        assert!(publish_at < integration_at);

        let published = bus.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type, LOCATION_CREATED);
        assert_eq!(published[0].aggregate_id, location_id);

        let stored = repo.find_by_id(&ctx, location_id).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_update_of_missing_location_aborts_before_mutation() {
        let ctx = RequestContext::new();
        let clock = fixed_clock();
        let log = CallLog::new();
        let repo = InMemoryWriteStore::<Location>::new();
        let bus = RecordingEventBus::new(log.clone());
        let integration = RecordingIntegrationPublisher::new(log.clone());

        let command = UpdateLocation {
            location_id: Uuid::new_v4(),
            name: "Renamed".into(),
            description: None,
            covered: false,
        };
        let result = update_location(&command, &ctx, &clock, &repo, &bus, &integration).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(bus.published().is_empty());
        assert!(integration.batches().is_empty());
    }

    #[tokio::test]
    async fn test_delete_location_removes_the_record_and_emits_deleted() {
        let ctx = RequestContext::new();
        let clock = fixed_clock();
        let log = CallLog::new();
        let repo = Arc::new(InMemoryWriteStore::<Location>::new());
        let bus = RecordingEventBus::new(log.clone());
        let integration = RecordingIntegrationPublisher::new(log.clone());

        let create = CreateLocation {
            name: "Old bed".into(),
            description: None,
            covered: false,
        };
        let location_id = create_location(&create, &ctx, &clock, repo.as_ref(), &bus, &integration)
            .await
            .unwrap();

        let command = DeleteLocation { location_id };
        delete_location(&command, &ctx, &clock, repo.as_ref(), &bus, &integration)
            .await
            .unwrap();

        assert!(repo.find_by_id(&ctx, location_id).await.unwrap().is_none());
        let tags: Vec<&str> = bus.published().iter().map(|e| e.event_type).collect();
        assert_eq!(tags, vec![LOCATION_CREATED, LOCATION_DELETED]);
    }
}
