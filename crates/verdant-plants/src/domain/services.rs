//! Stateless domain logic spanning plant and growing-unit aggregates.

use verdant_core::error::DomainError;
use verdant_growing_units::domain::aggregates::GrowingUnit;

use super::aggregates::Plant;

/// Capacity and consistency checks for moving a plant between units.
///
/// # Errors
///
/// Returns `DomainError::Validation` when source and target are the same
/// unit, when the source does not actually host the plant, or when the
/// target has no free capacity.
pub fn ensure_transplant_allowed(
    plant: &Plant,
    source: &GrowingUnit,
    target: &GrowingUnit,
) -> Result<(), DomainError> {
    if source.id() == target.id() {
        return Err(DomainError::Validation(format!(
            "plant {} is already in growing unit {}",
            plant.id(),
            target.id()
        )));
    }
    if !source.contains_plant(plant.id()) {
        return Err(DomainError::Validation(format!(
            "growing unit {} does not host plant {}",
            source.id(),
            plant.id()
        )));
    }
    if !target.has_free_capacity() {
        return Err(DomainError::Validation(format!(
            "growing unit {} is at capacity ({})",
            target.id(),
            target.capacity()
        )));
    }
    Ok(())
}
