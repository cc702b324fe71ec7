//! Integration event tags and builders for the Plants context.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use verdant_core::integration::IntegrationEvent;

/// A plant came into existence.
pub const PLANT_CREATED: &str = "plant.created";
/// A plant changed (details, status, or hosting unit).
pub const PLANT_UPDATED: &str = "plant.updated";
/// A plant was removed.
pub const PLANT_DELETED: &str = "plant.deleted";

/// Builds a `plant.created` integration event.
#[must_use]
pub fn plant_created(plant_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        PLANT_CREATED,
        plant_id,
        json!({ "plant_id": plant_id }),
        occurred_at,
    )
}

/// Builds a `plant.updated` integration event.
#[must_use]
pub fn plant_updated(plant_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        PLANT_UPDATED,
        plant_id,
        json!({ "plant_id": plant_id }),
        occurred_at,
    )
}

/// Builds a `plant.deleted` integration event.
#[must_use]
pub fn plant_deleted(plant_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        PLANT_DELETED,
        plant_id,
        json!({ "plant_id": plant_id }),
        occurred_at,
    )
}
