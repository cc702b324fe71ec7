//! Cross-context queries this context consumes.
//!
//! The tags (and the JSON shapes behind them) are the contract with the
//! owning contexts; no crate dependency is taken on them.

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use verdant_core::query::CrossContextQuery;

/// Served by the Locations context: one location view by id, or null.
pub const LOCATION_BY_ID: &str = "location.by_id";

/// Served by the Plants context: plant summaries for a list of ids, in
/// request order (unknown ids are skipped).
pub const PLANT_SUMMARIES_BY_IDS: &str = "plant.summaries_by_ids";

/// The slice of a location view this context cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRef {
    /// The location's id.
    pub id: Uuid,
    /// The location's display name.
    pub name: String,
}

/// Builds a `location.by_id` query.
#[must_use]
pub fn location_by_id(location_id: Uuid) -> CrossContextQuery {
    CrossContextQuery::new(LOCATION_BY_ID, json!({ "location_id": location_id }))
}

/// Builds a `plant.summaries_by_ids` query.
#[must_use]
pub fn plant_summaries_by_ids(plant_ids: &[Uuid]) -> CrossContextQuery {
    CrossContextQuery::new(PLANT_SUMMARIES_BY_IDS, json!({ "plant_ids": plant_ids }))
}
