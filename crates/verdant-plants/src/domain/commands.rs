//! Commands for the Plants context.

use uuid::Uuid;

use super::aggregates::PlantStatus;

/// Command to create a plant in a growing unit.
#[derive(Debug, Clone)]
pub struct CreatePlant {
    /// Display name.
    pub name: String,
    /// Species label.
    pub species: String,
    /// Initial lifecycle status.
    pub status: PlantStatus,
    /// The hosting growing unit; must exist and have free capacity.
    pub growing_unit_id: Uuid,
    /// Free-form care notes.
    pub notes: Option<String>,
}

/// Command to replace a plant's details.
#[derive(Debug, Clone)]
pub struct UpdatePlant {
    /// The plant to update.
    pub plant_id: Uuid,
    /// New display name.
    pub name: String,
    /// New species label.
    pub species: String,
    /// New notes.
    pub notes: Option<String>,
}

/// Command to set a plant's lifecycle status.
#[derive(Debug, Clone)]
pub struct ChangePlantStatus {
    /// The plant to update.
    pub plant_id: Uuid,
    /// The new status.
    pub status: PlantStatus,
}

/// Command to move a plant to another growing unit.
#[derive(Debug, Clone)]
pub struct TransplantPlant {
    /// The plant to move.
    pub plant_id: Uuid,
    /// The destination unit; must exist and have free capacity.
    pub target_unit_id: Uuid,
}

/// Command to delete a plant.
#[derive(Debug, Clone)]
pub struct DeletePlant {
    /// The plant to delete.
    pub plant_id: Uuid,
}
