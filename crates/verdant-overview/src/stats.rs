//! Independent statistic calculators.
//!
//! Pure functions over the fetched growing-unit views and the plant
//! summaries flattened out of them; each calculator is oblivious to the
//! others.

use std::collections::BTreeMap;

use verdant_growing_units::application::view_models::{GrowingUnitView, PlantSummary};

use crate::view_models::PlantsPerUnit;

/// Plant counts keyed by lifecycle status tag.
#[must_use]
pub fn plants_by_status(plants: &[PlantSummary]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for plant in plants {
        *counts.entry(plant.status.clone()).or_insert(0) += 1;
    }
    counts
}

/// Plant counts keyed by species label.
#[must_use]
pub fn plants_by_species(plants: &[PlantSummary]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for plant in plants {
        *counts.entry(plant.species.clone()).or_insert(0) += 1;
    }
    counts
}

/// Unit counts keyed by physical form tag.
#[must_use]
pub fn units_by_kind(units: &[GrowingUnitView]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for unit in units {
        *counts.entry(unit.kind.clone()).or_insert(0) += 1;
    }
    counts
}

/// Sum of all unit capacities.
#[must_use]
pub fn total_capacity(units: &[GrowingUnitView]) -> u64 {
    units.iter().map(|u| u64::from(u.capacity)).sum()
}

/// Sum of all hosted plant counts.
#[must_use]
pub fn occupied_slots(units: &[GrowingUnitView]) -> u64 {
    units.iter().map(|u| u64::from(u.plant_count)).sum()
}

/// Occupied share of total capacity; 0 when there is no capacity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn occupancy_rate(total_capacity: u64, occupied_slots: u64) -> f64 {
    if total_capacity == 0 {
        return 0.0;
    }
    occupied_slots as f64 / total_capacity as f64
}

/// Sum of all unit volumes, in liters.
#[must_use]
pub fn total_volume_liters(units: &[GrowingUnitView]) -> f64 {
    units.iter().map(|u| u.volume_liters).sum()
}

/// Min/max/median plants per unit; all zero when there are no units.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn plants_per_unit(units: &[GrowingUnitView]) -> PlantsPerUnit {
    if units.is_empty() {
        return PlantsPerUnit::default();
    }

    let mut counts: Vec<u32> = units.iter().map(|u| u.plant_count).collect();
    counts.sort_unstable();

    let mid = counts.len() / 2;
    let median = if counts.len() % 2 == 1 {
        f64::from(counts[mid])
    } else {
        f64::from(counts[mid - 1] + counts[mid]) / 2.0
    };

    PlantsPerUnit {
        min: counts[0],
        max: counts[counts.len() - 1],
        median,
    }
}
