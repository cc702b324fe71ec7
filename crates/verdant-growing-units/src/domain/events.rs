//! Domain event tags for the Growing Units context.
//!
//! Events travel as envelopes whose payload is the aggregate's
//! post-mutation `GrowingUnitPrimitives`.

/// Emitted when a growing unit is created.
pub const GROWING_UNIT_CREATED: &str = "growing_unit.created";

/// Emitted when a growing unit's details change (including relocation).
pub const GROWING_UNIT_UPDATED: &str = "growing_unit.updated";

/// Emitted when a plant is assigned to the unit.
pub const GROWING_UNIT_PLANT_ADDED: &str = "growing_unit.plant_added";

/// Emitted when a plant is released from the unit.
pub const GROWING_UNIT_PLANT_REMOVED: &str = "growing_unit.plant_removed";

/// Emitted when a growing unit is removed.
pub const GROWING_UNIT_DELETED: &str = "growing_unit.deleted";
