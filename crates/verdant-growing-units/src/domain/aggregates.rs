//! Aggregate root for the Growing Units context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::aggregate::{AggregateRoot, EventBuffer, Persistable};
use verdant_core::clock::Clock;
use verdant_core::error::DomainError;
use verdant_core::event::DomainEvent;

use super::events::{
    GROWING_UNIT_CREATED, GROWING_UNIT_DELETED, GROWING_UNIT_PLANT_ADDED,
    GROWING_UNIT_PLANT_REMOVED, GROWING_UNIT_UPDATED,
};

/// Type tag stamped onto every growing-unit event.
pub const GROWING_UNIT_AGGREGATE_TYPE: &str = "GrowingUnit";

/// The physical form of a growing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// An open ground bed.
    Bed,
    /// A single pot.
    Pot,
    /// A seedling tray.
    Tray,
    /// A hydroponic system.
    Hydroponic,
}

impl UnitKind {
    /// Stable string form, matching the serde encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bed => "bed",
            Self::Pot => "pot",
            Self::Tray => "tray",
            Self::Hydroponic => "hydroponic",
        }
    }
}

/// Physical dimensions of a unit, in centimeters. All strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in centimeters.
    pub width_cm: f64,
    /// Depth in centimeters.
    pub depth_cm: f64,
    /// Height in centimeters.
    pub height_cm: f64,
}

impl Dimensions {
    /// Builds validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless all sides are finite and
    /// strictly positive.
    pub fn new(width_cm: f64, depth_cm: f64, height_cm: f64) -> Result<Self, DomainError> {
        for (side, value) in [("width", width_cm), ("depth", depth_cm), ("height", height_cm)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::Validation(format!(
                    "unit {side} must be a positive number of centimeters, got {value}"
                )));
            }
        }
        Ok(Self {
            width_cm,
            depth_cm,
            height_cm,
        })
    }

    /// Enclosed volume in liters.
    #[must_use]
    pub fn volume_liters(&self) -> f64 {
        self.width_cm * self.depth_cm * self.height_cm / 1000.0
    }
}

/// A container plants grow in, anchored to a location.
#[derive(Debug, Clone)]
pub struct GrowingUnit {
    id: Uuid,
    name: String,
    location_id: Uuid,
    kind: UnitKind,
    capacity: u32,
    dimensions: Dimensions,
    plant_ids: Vec<Uuid>,
    events: EventBuffer,
}

/// Primitive representation of a `GrowingUnit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingUnitPrimitives {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Display name, non-empty.
    pub name: String,
    /// The location hosting this unit.
    pub location_id: Uuid,
    /// Physical form.
    pub kind: UnitKind,
    /// Maximum number of plants, at least 1.
    pub capacity: u32,
    /// Physical dimensions.
    pub dimensions: Dimensions,
    /// Plants currently hosted, in assignment order.
    pub plant_ids: Vec<Uuid>,
}

impl GrowingUnit {
    /// Creates a new, empty growing unit, buffering a `growing_unit.created`
    /// event unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty or the
    /// capacity is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: Uuid,
        name: &str,
        location_id: Uuid,
        kind: UnitKind,
        capacity: u32,
        dimensions: Dimensions,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<Self, DomainError> {
        let mut unit = Self {
            id,
            name: validated_name(name)?,
            location_id,
            kind,
            capacity: validated_capacity(capacity, 0)?,
            dimensions,
            plant_ids: Vec::new(),
            events: EventBuffer::new(),
        };
        if emit_event {
            unit.record(GROWING_UNIT_CREATED, clock);
        }
        Ok(unit)
    }

    /// Aggregate identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location hosting this unit.
    #[must_use]
    pub fn location_id(&self) -> Uuid {
        self.location_id
    }

    /// Physical form.
    #[must_use]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Maximum number of plants.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Physical dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Plants currently hosted, in assignment order.
    #[must_use]
    pub fn plant_ids(&self) -> &[Uuid] {
        &self.plant_ids
    }

    /// Number of plants currently hosted.
    #[must_use]
    pub fn occupancy(&self) -> u32 {
        u32::try_from(self.plant_ids.len()).unwrap_or(u32::MAX)
    }

    /// Whether another plant fits.
    #[must_use]
    pub fn has_free_capacity(&self) -> bool {
        self.occupancy() < self.capacity
    }

    /// Whether the given plant is hosted here.
    #[must_use]
    pub fn contains_plant(&self, plant_id: Uuid) -> bool {
        self.plant_ids.contains(&plant_id)
    }

    /// Replaces name, kind, capacity, and dimensions, buffering a
    /// `growing_unit.updated` event unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty or the new
    /// capacity is below the current occupancy.
    pub fn update_details(
        &mut self,
        name: &str,
        kind: UnitKind,
        capacity: u32,
        dimensions: Dimensions,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        self.name = validated_name(name)?;
        self.capacity = validated_capacity(capacity, self.occupancy())?;
        self.kind = kind;
        self.dimensions = dimensions;
        if emit_event {
            self.record(GROWING_UNIT_UPDATED, clock);
        }
        Ok(())
    }

    /// Moves the unit to another location, buffering a
    /// `growing_unit.updated` event unless `emit_event` is false.
    pub fn relocate(&mut self, location_id: Uuid, clock: &dyn Clock, emit_event: bool) {
        self.location_id = location_id;
        if emit_event {
            self.record(GROWING_UNIT_UPDATED, clock);
        }
    }

    /// Assigns a plant to this unit, buffering a
    /// `growing_unit.plant_added` event unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the plant is already hosted here
    /// or the unit is at capacity.
    pub fn assign_plant(
        &mut self,
        plant_id: Uuid,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        if self.contains_plant(plant_id) {
            return Err(DomainError::Validation(format!(
                "plant {plant_id} is already in growing unit {}",
                self.id
            )));
        }
        if !self.has_free_capacity() {
            return Err(DomainError::Validation(format!(
                "growing unit {} is at capacity ({})",
                self.id, self.capacity
            )));
        }
        self.plant_ids.push(plant_id);
        if emit_event {
            self.record(GROWING_UNIT_PLANT_ADDED, clock);
        }
        Ok(())
    }

    /// Releases a plant from this unit, buffering a
    /// `growing_unit.plant_removed` event unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the plant is not hosted here.
    pub fn release_plant(
        &mut self,
        plant_id: Uuid,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        let position = self
            .plant_ids
            .iter()
            .position(|id| *id == plant_id)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "plant {plant_id} is not in growing unit {}",
                    self.id
                ))
            })?;
        self.plant_ids.remove(position);
        if emit_event {
            self.record(GROWING_UNIT_PLANT_REMOVED, clock);
        }
        Ok(())
    }

    /// Marks the unit deleted, buffering a `growing_unit.deleted` event
    /// unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` while plants are still hosted here.
    pub fn delete(&mut self, clock: &dyn Clock, emit_event: bool) -> Result<(), DomainError> {
        if !self.plant_ids.is_empty() {
            return Err(DomainError::Validation(format!(
                "growing unit {} still hosts {} plant(s)",
                self.id,
                self.plant_ids.len()
            )));
        }
        if emit_event {
            self.record(GROWING_UNIT_DELETED, clock);
        }
        Ok(())
    }

    fn record(&mut self, event_type: &'static str, clock: &dyn Clock) {
        let payload = serde_json::to_value(self.to_primitives())
            .expect("GrowingUnitPrimitives serialization is infallible");
        self.events.record(DomainEvent::new(
            self.id,
            GROWING_UNIT_AGGREGATE_TYPE,
            event_type,
            payload,
            clock.now(),
        ));
    }
}

fn validated_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "growing unit name must not be empty".into(),
        ));
    }
    Ok(trimmed.to_owned())
}

fn validated_capacity(capacity: u32, occupancy: u32) -> Result<u32, DomainError> {
    if capacity == 0 {
        return Err(DomainError::Validation(
            "growing unit capacity must be at least 1".into(),
        ));
    }
    if capacity < occupancy {
        return Err(DomainError::Validation(format!(
            "capacity {capacity} is below current occupancy {occupancy}"
        )));
    }
    Ok(capacity)
}

impl AggregateRoot for GrowingUnit {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn aggregate_type(&self) -> &'static str {
        GROWING_UNIT_AGGREGATE_TYPE
    }

    fn uncommitted_events(&self) -> &[DomainEvent] {
        self.events.as_slice()
    }

    fn commit(&mut self) {
        self.events.clear();
    }
}

impl Persistable for GrowingUnit {
    type Primitives = GrowingUnitPrimitives;

    fn to_primitives(&self) -> GrowingUnitPrimitives {
        GrowingUnitPrimitives {
            id: self.id,
            name: self.name.clone(),
            location_id: self.location_id,
            kind: self.kind,
            capacity: self.capacity,
            dimensions: self.dimensions,
            plant_ids: self.plant_ids.clone(),
        }
    }

    fn from_primitives(primitives: GrowingUnitPrimitives) -> Result<Self, DomainError> {
        let occupancy = u32::try_from(primitives.plant_ids.len()).unwrap_or(u32::MAX);
        Ok(Self {
            id: primitives.id,
            name: validated_name(&primitives.name)?,
            location_id: primitives.location_id,
            kind: primitives.kind,
            capacity: validated_capacity(primitives.capacity, occupancy)?,
            dimensions: Dimensions::new(
                primitives.dimensions.width_cm,
                primitives.dimensions.depth_cm,
                primitives.dimensions.height_cm,
            )?,
            plant_ids: primitives.plant_ids,
            events: EventBuffer::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use verdant_core::aggregate::{AggregateRoot, Persistable};
    use verdant_core::error::DomainError;
    use verdant_test_support::FixedClock;

    use crate::domain::events::{
        GROWING_UNIT_CREATED, GROWING_UNIT_PLANT_ADDED, GROWING_UNIT_PLANT_REMOVED,
    };

    use super::{Dimensions, GrowingUnit, UnitKind};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
    }

    fn unit(capacity: u32) -> GrowingUnit {
        GrowingUnit::create(
            Uuid::new_v4(),
            "Bench 1",
            Uuid::new_v4(),
            UnitKind::Tray,
            capacity,
            Dimensions::new(60.0, 40.0, 15.0).unwrap(),
            &fixed_clock(),
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_assign_and_release_buffer_events_in_order() {
        let clock = fixed_clock();
        let mut unit = unit(2);
        let plant = Uuid::new_v4();

        unit.assign_plant(plant, &clock, true).unwrap();
        unit.release_plant(plant, &clock, true).unwrap();

        let tags: Vec<&str> = unit.uncommitted_events().iter().map(|e| e.event_type).collect();
        assert_eq!(
            tags,
            vec![
                GROWING_UNIT_CREATED,
                GROWING_UNIT_PLANT_ADDED,
                GROWING_UNIT_PLANT_REMOVED
            ]
        );
    }

    #[test]
    fn test_assignment_beyond_capacity_is_rejected() {
        let clock = fixed_clock();
        let mut unit = unit(1);
        unit.assign_plant(Uuid::new_v4(), &clock, true).unwrap();

        let result = unit.assign_plant(Uuid::new_v4(), &clock, true);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        // The failed call must not have buffered anything.
        assert_eq!(unit.uncommitted_events().len(), 2);
    }

    #[test]
    fn test_duplicate_assignment_is_rejected() {
        let clock = fixed_clock();
        let mut unit = unit(3);
        let plant = Uuid::new_v4();
        unit.assign_plant(plant, &clock, true).unwrap();

        assert!(matches!(
            unit.assign_plant(plant, &clock, true),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_releasing_an_unknown_plant_is_rejected() {
        let clock = fixed_clock();
        let mut unit = unit(3);
        assert!(matches!(
            unit.release_plant(Uuid::new_v4(), &clock, true),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_capacity_cannot_drop_below_occupancy() {
        let clock = fixed_clock();
        let mut unit = unit(3);
        unit.assign_plant(Uuid::new_v4(), &clock, true).unwrap();
        unit.assign_plant(Uuid::new_v4(), &clock, true).unwrap();

        let result = unit.update_details(
            "Bench 1",
            UnitKind::Tray,
            1,
            Dimensions::new(60.0, 40.0, 15.0).unwrap(),
            &clock,
            true,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_delete_is_rejected_while_plants_remain() {
        let clock = fixed_clock();
        let mut unit = unit(2);
        unit.assign_plant(Uuid::new_v4(), &clock, true).unwrap();

        assert!(matches!(
            unit.delete(&clock, true),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_or_negative_dimensions_are_rejected() {
        assert!(Dimensions::new(0.0, 40.0, 15.0).is_err());
        assert!(Dimensions::new(60.0, -1.0, 15.0).is_err());
        assert!(Dimensions::new(60.0, 40.0, f64::NAN).is_err());
    }

    #[test]
    fn test_volume_is_width_depth_height_over_a_thousand() {
        let dimensions = Dimensions::new(100.0, 50.0, 20.0).unwrap();
        assert!((dimensions.volume_liters() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hydration_preserves_membership_without_events() {
        let clock = fixed_clock();
        let mut unit = unit(2);
        unit.assign_plant(Uuid::new_v4(), &clock, true).unwrap();

        let hydrated = GrowingUnit::from_primitives(unit.to_primitives()).unwrap();

        assert!(hydrated.uncommitted_events().is_empty());
        assert_eq!(hydrated.plant_ids(), unit.plant_ids());
        assert_eq!(hydrated.occupancy(), 1);
    }
}
