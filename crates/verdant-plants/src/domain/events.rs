//! Domain event tags for the Plants context.
//!
//! Events travel as envelopes whose payload is the aggregate's
//! post-mutation `PlantPrimitives`.

/// Emitted when a plant is created.
pub const PLANT_CREATED: &str = "plant.created";

/// Emitted when a plant's details change.
pub const PLANT_UPDATED: &str = "plant.updated";

/// Emitted when a plant's lifecycle status changes.
pub const PLANT_STATUS_CHANGED: &str = "plant.status_changed";

/// Emitted when a plant moves to another growing unit.
pub const PLANT_TRANSPLANTED: &str = "plant.transplanted";

/// Emitted when a plant is removed.
pub const PLANT_DELETED: &str = "plant.deleted";
