//! Read-side view models for the Plants context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::repository::ViewModel;

/// Denormalized projection of a plant, owned by the read side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantView {
    /// Same id as the source aggregate.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Species label.
    pub species: String,
    /// Lifecycle status tag (e.g. `"growing"`).
    pub status: String,
    /// The growing unit currently hosting this plant.
    pub growing_unit_id: Uuid,
    /// Free-form care notes.
    pub notes: Option<String>,
    /// When the plant entered the system.
    pub planted_at: DateTime<Utc>,
}

impl ViewModel for PlantView {
    fn view_id(&self) -> Uuid {
        self.id
    }
}
