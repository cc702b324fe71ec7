//! Integration event tags and builders for the Growing Units context.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use verdant_core::integration::IntegrationEvent;

/// A growing unit came into existence.
pub const GROWING_UNIT_CREATED: &str = "growing_unit.created";
/// A growing unit changed (details, location, or plant membership).
pub const GROWING_UNIT_UPDATED: &str = "growing_unit.updated";
/// A growing unit was removed.
pub const GROWING_UNIT_DELETED: &str = "growing_unit.deleted";

/// Builds a `growing_unit.created` integration event.
#[must_use]
pub fn growing_unit_created(growing_unit_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        GROWING_UNIT_CREATED,
        growing_unit_id,
        json!({ "growing_unit_id": growing_unit_id }),
        occurred_at,
    )
}

/// Builds a `growing_unit.updated` integration event.
#[must_use]
pub fn growing_unit_updated(growing_unit_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        GROWING_UNIT_UPDATED,
        growing_unit_id,
        json!({ "growing_unit_id": growing_unit_id }),
        occurred_at,
    )
}

/// Builds a `growing_unit.deleted` integration event.
#[must_use]
pub fn growing_unit_deleted(growing_unit_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        GROWING_UNIT_DELETED,
        growing_unit_id,
        json!({ "growing_unit_id": growing_unit_id }),
        occurred_at,
    )
}
