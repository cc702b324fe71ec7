//! Integration event tags and builders for the Locations context.
//!
//! These are the coarse, cross-context notifications the command handler
//! layer publishes after persistence; they share names with their domain
//! counterparts but travel on the integration bus.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use verdant_core::integration::IntegrationEvent;

/// A location came into existence.
pub const LOCATION_CREATED: &str = "location.created";
/// A location's details changed.
pub const LOCATION_UPDATED: &str = "location.updated";
/// A location was removed.
pub const LOCATION_DELETED: &str = "location.deleted";

/// Builds a `location.created` integration event.
#[must_use]
pub fn location_created(location_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        LOCATION_CREATED,
        location_id,
        json!({ "location_id": location_id }),
        occurred_at,
    )
}

/// Builds a `location.updated` integration event.
#[must_use]
pub fn location_updated(location_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        LOCATION_UPDATED,
        location_id,
        json!({ "location_id": location_id }),
        occurred_at,
    )
}

/// Builds a `location.deleted` integration event.
#[must_use]
pub fn location_deleted(location_id: Uuid, occurred_at: DateTime<Utc>) -> IntegrationEvent {
    IntegrationEvent::new(
        LOCATION_DELETED,
        location_id,
        json!({ "location_id": location_id }),
        occurred_at,
    )
}
