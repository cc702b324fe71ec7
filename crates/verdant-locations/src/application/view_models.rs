//! Read-side view models for the Locations context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::repository::ViewModel;

/// Denormalized projection of a location, owned by the read side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationView {
    /// Same id as the source aggregate.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the location is covered.
    pub covered: bool,
}

impl ViewModel for LocationView {
    fn view_id(&self) -> Uuid {
        self.id
    }
}
