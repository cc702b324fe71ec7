//! Commands for the Locations context.

use uuid::Uuid;

/// Command to create a location.
#[derive(Debug, Clone)]
pub struct CreateLocation {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the location is covered.
    pub covered: bool,
}

/// Command to replace a location's details.
#[derive(Debug, Clone)]
pub struct UpdateLocation {
    /// The location to update.
    pub location_id: Uuid,
    /// New display name.
    pub name: String,
    /// New description.
    pub description: Option<String>,
    /// New covered flag.
    pub covered: bool,
}

/// Command to delete a location.
#[derive(Debug, Clone)]
pub struct DeleteLocation {
    /// The location to delete.
    pub location_id: Uuid,
}
