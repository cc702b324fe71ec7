//! Command handlers for the Plants context.
//!
//! The transplant handler is the canonical multi-aggregate write: every
//! touched aggregate is loaded up front (fail fast), the capacity check is
//! delegated to the stateless domain service, and persistence order is
//! plant first, then the units that reference it — a crash mid-sequence
//! leaves the plant pointing at a valid (if stale) unit rather than a unit
//! referencing an orphan.

use uuid::Uuid;

use verdant_core::bus::{EventBus, dispatch_and_commit};
use verdant_core::clock::Clock;
use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::integration::IntegrationEventPublisher;
use verdant_core::repository::{WriteRepository, require_aggregate};

use verdant_growing_units::application::integration_events::growing_unit_updated;
use verdant_growing_units::domain::aggregates::{GROWING_UNIT_AGGREGATE_TYPE, GrowingUnit};

use crate::domain::aggregates::{PLANT_AGGREGATE_TYPE, Plant};
use crate::domain::commands::{
    ChangePlantStatus, CreatePlant, DeletePlant, TransplantPlant, UpdatePlant,
};
use crate::domain::services;

use super::integration_events;

/// Handles `CreatePlant` and returns the new plant's id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the growing unit does not exist, or
/// `DomainError::Validation` when the unit is full or the fields are
/// invalid.
pub async fn create_plant(
    command: &CreatePlant,
    ctx: &RequestContext,
    clock: &dyn Clock,
    plants: &dyn WriteRepository<Plant>,
    units: &dyn WriteRepository<GrowingUnit>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<Uuid, DomainError> {
    let mut unit = require_aggregate(
        units,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        command.growing_unit_id,
    )
    .await?;

    let plant_id = Uuid::new_v4();
    let mut plant = Plant::create(
        plant_id,
        &command.name,
        &command.species,
        command.status,
        command.growing_unit_id,
        command.notes.clone(),
        clock,
        true,
    )?;
    unit.assign_plant(plant_id, clock, true)?;

    // The plant is saved before the unit that references it.
    plants.save(ctx, &plant).await?;
    units.save(ctx, &unit).await?;

    dispatch_and_commit(ctx, event_bus, &mut plant).await;
    dispatch_and_commit(ctx, event_bus, &mut unit).await;
    integration
        .execute(
            ctx,
            &[
                integration_events::plant_created(plant_id, clock.now()),
                growing_unit_updated(command.growing_unit_id, clock.now()),
            ],
        )
        .await;

    tracing::info!(%plant_id, growing_unit_id = %command.growing_unit_id, correlation_id = %ctx.correlation_id, "plant created");
    Ok(plant_id)
}

/// Handles `UpdatePlant`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plant does not exist, or
/// `DomainError::Validation` for invalid fields.
pub async fn update_plant(
    command: &UpdatePlant,
    ctx: &RequestContext,
    clock: &dyn Clock,
    plants: &dyn WriteRepository<Plant>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut plant = require_aggregate(plants, ctx, PLANT_AGGREGATE_TYPE, command.plant_id).await?;

    plant.update_details(
        &command.name,
        &command.species,
        command.notes.clone(),
        clock,
        true,
    )?;

    plants.save(ctx, &plant).await?;

    dispatch_and_commit(ctx, event_bus, &mut plant).await;
    integration
        .execute(
            ctx,
            &[integration_events::plant_updated(command.plant_id, clock.now())],
        )
        .await;

    Ok(())
}

/// Handles `ChangePlantStatus`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plant does not exist.
pub async fn change_plant_status(
    command: &ChangePlantStatus,
    ctx: &RequestContext,
    clock: &dyn Clock,
    plants: &dyn WriteRepository<Plant>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut plant = require_aggregate(plants, ctx, PLANT_AGGREGATE_TYPE, command.plant_id).await?;

    plant.change_status(command.status, clock, true);
    plants.save(ctx, &plant).await?;

    dispatch_and_commit(ctx, event_bus, &mut plant).await;
    integration
        .execute(
            ctx,
            &[integration_events::plant_updated(command.plant_id, clock.now())],
        )
        .await;

    Ok(())
}

/// Handles `TransplantPlant`: moves a plant from its current unit to the
/// target unit.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plant, its current unit, or the
/// target unit does not exist; `DomainError::Validation` when the move
/// violates a capacity or membership invariant.
pub async fn transplant_plant(
    command: &TransplantPlant,
    ctx: &RequestContext,
    clock: &dyn Clock,
    plants: &dyn WriteRepository<Plant>,
    units: &dyn WriteRepository<GrowingUnit>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    // 1. Load everything the command touches; any unknown id aborts here.
    let mut plant = require_aggregate(plants, ctx, PLANT_AGGREGATE_TYPE, command.plant_id).await?;
    let mut source = require_aggregate(
        units,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        plant.growing_unit_id(),
    )
    .await?;
    let mut target = require_aggregate(
        units,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        command.target_unit_id,
    )
    .await?;

    // 2. Cross-aggregate checks live in the domain service.
    services::ensure_transplant_allowed(&plant, &source, &target)?;

    // 3. Mutate all three aggregates in memory.
    plant.transplant(command.target_unit_id, clock, true)?;
    source.release_plant(command.plant_id, clock, true)?;
    target.assign_plant(command.plant_id, clock, true)?;

    // 4. Persist: the moved plant first, then the units referencing it.
    plants.save(ctx, &plant).await?;
    units.save(ctx, &source).await?;
    units.save(ctx, &target).await?;

    // 5. Dispatch per aggregate, in the same order, then the integration
    //    batch describing the net effect.
    dispatch_and_commit(ctx, event_bus, &mut plant).await;
    dispatch_and_commit(ctx, event_bus, &mut source).await;
    dispatch_and_commit(ctx, event_bus, &mut target).await;
    integration
        .execute(
            ctx,
            &[
                integration_events::plant_updated(command.plant_id, clock.now()),
                growing_unit_updated(source.id(), clock.now()),
                growing_unit_updated(target.id(), clock.now()),
            ],
        )
        .await;

    tracing::info!(
        plant_id = %command.plant_id,
        source_unit = %source.id(),
        target_unit = %target.id(),
        correlation_id = %ctx.correlation_id,
        "plant transplanted"
    );
    Ok(())
}

/// Handles `DeletePlant`: removes the plant and releases it from its unit.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plant or its unit does not exist.
pub async fn delete_plant(
    command: &DeletePlant,
    ctx: &RequestContext,
    clock: &dyn Clock,
    plants: &dyn WriteRepository<Plant>,
    units: &dyn WriteRepository<GrowingUnit>,
    event_bus: &dyn EventBus,
    integration: &dyn IntegrationEventPublisher,
) -> Result<(), DomainError> {
    let mut plant = require_aggregate(plants, ctx, PLANT_AGGREGATE_TYPE, command.plant_id).await?;
    let mut unit = require_aggregate(
        units,
        ctx,
        GROWING_UNIT_AGGREGATE_TYPE,
        plant.growing_unit_id(),
    )
    .await?;

    plant.delete(clock, true);
    unit.release_plant(command.plant_id, clock, true)?;

    plants.delete(ctx, command.plant_id).await?;
    units.save(ctx, &unit).await?;

    dispatch_and_commit(ctx, event_bus, &mut plant).await;
    dispatch_and_commit(ctx, event_bus, &mut unit).await;
    integration
        .execute(
            ctx,
            &[
                integration_events::plant_deleted(command.plant_id, clock.now()),
                growing_unit_updated(unit.id(), clock.now()),
            ],
        )
        .await;

    tracing::info!(plant_id = %command.plant_id, "plant deleted");
    Ok(())
}
