//! The overview snapshot view model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::repository::ViewModel;

/// The singleton id the snapshot is upserted under.
pub const OVERVIEW_SNAPSHOT_ID: Uuid = Uuid::nil();

/// Spread of plants-per-unit across all growing units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlantsPerUnit {
    /// Fewest plants hosted by any unit.
    pub min: u32,
    /// Most plants hosted by any unit.
    pub max: u32,
    /// Median plants per unit.
    pub median: f64,
}

/// Garden-wide statistics, recomputed from the full growing-unit read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSnapshot {
    /// Always `OVERVIEW_SNAPSHOT_ID`.
    pub id: Uuid,
    /// Total number of plants.
    pub total_plants: u64,
    /// Plant counts keyed by lifecycle status tag.
    pub plants_by_status: BTreeMap<String, u64>,
    /// Plant counts keyed by species label.
    pub plants_by_species: BTreeMap<String, u64>,
    /// Total number of growing units.
    pub total_units: u64,
    /// Unit counts keyed by physical form tag.
    pub units_by_kind: BTreeMap<String, u64>,
    /// Sum of all unit capacities.
    pub total_capacity: u64,
    /// Sum of all hosted plant counts.
    pub occupied_slots: u64,
    /// `occupied_slots / total_capacity`, or 0 when there is no capacity.
    pub occupancy_rate: f64,
    /// Sum of all unit volumes, in liters.
    pub total_volume_liters: f64,
    /// Min/max/median plants per unit.
    pub plants_per_unit: PlantsPerUnit,
    /// When this snapshot was computed.
    pub generated_at: DateTime<Utc>,
}

impl ViewModel for OverviewSnapshot {
    fn view_id(&self) -> Uuid {
        self.id
    }
}
