//! Read-side view models for the Growing Units context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::repository::ViewModel;

/// A plant as nested inside a growing-unit view. Mirrors the summary shape
/// the Plants context serves over the query bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSummary {
    /// The plant's id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Species label.
    pub species: String,
    /// Lifecycle status tag (e.g. `"growing"`).
    pub status: String,
}

/// Denormalized projection of a growing unit, with the owning location's
/// name and its plants nested in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingUnitView {
    /// Same id as the source aggregate.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The hosting location's id.
    pub location_id: Uuid,
    /// The hosting location's name; `None` when the location view is
    /// missing (e.g. deleted after this unit was projected).
    pub location_name: Option<String>,
    /// Physical form tag (e.g. `"tray"`).
    pub kind: String,
    /// Maximum number of plants.
    pub capacity: u32,
    /// Width in centimeters.
    pub width_cm: f64,
    /// Depth in centimeters.
    pub depth_cm: f64,
    /// Height in centimeters.
    pub height_cm: f64,
    /// Enclosed volume in liters.
    pub volume_liters: f64,
    /// Plants currently hosted, in assignment order.
    pub plants: Vec<PlantSummary>,
    /// Number of plants currently hosted.
    pub plant_count: u32,
    /// Remaining capacity.
    pub free_capacity: u32,
}

impl ViewModel for GrowingUnitView {
    fn view_id(&self) -> Uuid {
        self.id
    }
}
