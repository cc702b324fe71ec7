//! Commands for the Growing Units context.

use uuid::Uuid;

use super::aggregates::{Dimensions, UnitKind};

/// Command to create a growing unit in a location.
#[derive(Debug, Clone)]
pub struct CreateGrowingUnit {
    /// Display name.
    pub name: String,
    /// The hosting location; must exist.
    pub location_id: Uuid,
    /// Physical form.
    pub kind: UnitKind,
    /// Maximum number of plants.
    pub capacity: u32,
    /// Physical dimensions.
    pub dimensions: Dimensions,
}

/// Command to replace a growing unit's details.
#[derive(Debug, Clone)]
pub struct UpdateGrowingUnit {
    /// The unit to update.
    pub growing_unit_id: Uuid,
    /// New display name.
    pub name: String,
    /// New physical form.
    pub kind: UnitKind,
    /// New capacity; must cover current occupancy.
    pub capacity: u32,
    /// New dimensions.
    pub dimensions: Dimensions,
}

/// Command to move a growing unit to another location.
#[derive(Debug, Clone)]
pub struct RelocateGrowingUnit {
    /// The unit to move.
    pub growing_unit_id: Uuid,
    /// The destination location; must exist.
    pub location_id: Uuid,
}

/// Command to delete an empty growing unit.
#[derive(Debug, Clone)]
pub struct DeleteGrowingUnit {
    /// The unit to delete.
    pub growing_unit_id: Uuid,
}
