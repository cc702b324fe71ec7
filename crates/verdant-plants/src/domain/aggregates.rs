//! Aggregate root for the Plants context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::aggregate::{AggregateRoot, EventBuffer, Persistable};
use verdant_core::clock::Clock;
use verdant_core::error::DomainError;
use verdant_core::event::DomainEvent;

use super::events::{
    PLANT_CREATED, PLANT_DELETED, PLANT_STATUS_CHANGED, PLANT_TRANSPLANTED, PLANT_UPDATED,
};

/// Type tag stamped onto every plant event.
pub const PLANT_AGGREGATE_TYPE: &str = "Plant";

/// Lifecycle status of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantStatus {
    /// Recently germinated.
    Seedling,
    /// Actively growing.
    Growing,
    /// In bloom.
    Flowering,
    /// Produce has been taken.
    Harvested,
    /// Overwintering or otherwise inactive.
    Dormant,
}

impl PlantStatus {
    /// Stable string form, matching the serde encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Growing => "growing",
            Self::Flowering => "flowering",
            Self::Harvested => "harvested",
            Self::Dormant => "dormant",
        }
    }
}

/// An individual plant, always anchored to exactly one growing unit.
#[derive(Debug, Clone)]
pub struct Plant {
    id: Uuid,
    name: String,
    species: String,
    status: PlantStatus,
    growing_unit_id: Uuid,
    notes: Option<String>,
    planted_at: DateTime<Utc>,
    events: EventBuffer,
}

/// Primitive representation of a `Plant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantPrimitives {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Display name, non-empty.
    pub name: String,
    /// Species label, non-empty.
    pub species: String,
    /// Lifecycle status.
    pub status: PlantStatus,
    /// The growing unit currently hosting this plant.
    pub growing_unit_id: Uuid,
    /// Free-form care notes.
    pub notes: Option<String>,
    /// When the plant entered the system.
    pub planted_at: DateTime<Utc>,
}

impl Plant {
    /// Creates a new plant, buffering a `plant.created` event unless
    /// `emit_event` is false. `planted_at` is stamped from the clock.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name or species is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: Uuid,
        name: &str,
        species: &str,
        status: PlantStatus,
        growing_unit_id: Uuid,
        notes: Option<String>,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<Self, DomainError> {
        let mut plant = Self {
            id,
            name: validated(name, "plant name")?,
            species: validated(species, "plant species")?,
            status,
            growing_unit_id,
            notes: normalized(notes),
            planted_at: clock.now(),
            events: EventBuffer::new(),
        };
        if emit_event {
            plant.record(PLANT_CREATED, clock);
        }
        Ok(plant)
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

    /// Species label.
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> PlantStatus {
        self.status
    }

    /// The growing unit currently hosting this plant.
    #[must_use]
    pub fn growing_unit_id(&self) -> Uuid {
        self.growing_unit_id
    }

    /// Free-form care notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// When the plant entered the system.
    #[must_use]
    pub fn planted_at(&self) -> DateTime<Utc> {
        self.planted_at
    }

    /// Replaces name, species, and notes, buffering a `plant.updated` event
    /// unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the new name or species is empty.
    pub fn update_details(
        &mut self,
        name: &str,
        species: &str,
        notes: Option<String>,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        self.name = validated(name, "plant name")?;
        self.species = validated(species, "plant species")?;
        self.notes = normalized(notes);
        if emit_event {
            self.record(PLANT_UPDATED, clock);
        }
        Ok(())
    }

    /// Sets the lifecycle status, buffering a `plant.status_changed` event
    /// unless `emit_event` is false. Transitions are unconstrained; a
    /// same-status call still emits, carrying the post-mutation state.
    pub fn change_status(&mut self, status: PlantStatus, clock: &dyn Clock, emit_event: bool) {
        self.status = status;
        if emit_event {
            self.record(PLANT_STATUS_CHANGED, clock);
        }
    }

    /// Moves the plant to another growing unit, buffering a
    /// `plant.transplanted` event unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the target is the current unit.
    pub fn transplant(
        &mut self,
        target_unit_id: Uuid,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        if target_unit_id == self.growing_unit_id {
            return Err(DomainError::Validation(format!(
                "plant {} is already in growing unit {target_unit_id}",
                self.id
            )));
        }
        self.growing_unit_id = target_unit_id;
        if emit_event {
            self.record(PLANT_TRANSPLANTED, clock);
        }
        Ok(())
    }

    /// Marks the plant deleted, buffering a `plant.deleted` event unless
    /// `emit_event` is false.
    pub fn delete(&mut self, clock: &dyn Clock, emit_event: bool) {
        if emit_event {
            self.record(PLANT_DELETED, clock);
        }
    }

    fn record(&mut self, event_type: &'static str, clock: &dyn Clock) {
        let payload = serde_json::to_value(self.to_primitives())
            .expect("PlantPrimitives serialization is infallible");
        self.events.record(DomainEvent::new(
            self.id,
            PLANT_AGGREGATE_TYPE,
            event_type,
            payload,
            clock.now(),
        ));
    }
}

fn validated(value: &str, label: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

fn normalized(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

impl AggregateRoot for Plant {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn aggregate_type(&self) -> &'static str {
        PLANT_AGGREGATE_TYPE
    }

    fn uncommitted_events(&self) -> &[DomainEvent] {
        self.events.as_slice()
    }

    fn commit(&mut self) {
        self.events.clear();
    }
}

impl Persistable for Plant {
    type Primitives = PlantPrimitives;

    fn to_primitives(&self) -> PlantPrimitives {
        PlantPrimitives {
            id: self.id,
            name: self.name.clone(),
            species: self.species.clone(),
            status: self.status,
            growing_unit_id: self.growing_unit_id,
            notes: self.notes.clone(),
            planted_at: self.planted_at,
        }
    }

    fn from_primitives(primitives: PlantPrimitives) -> Result<Self, DomainError> {
        Ok(Self {
            id: primitives.id,
            name: validated(&primitives.name, "plant name")?,
            species: validated(&primitives.species, "plant species")?,
            status: primitives.status,
            growing_unit_id: primitives.growing_unit_id,
            notes: normalized(primitives.notes),
            planted_at: primitives.planted_at,
            events: EventBuffer::new(),
        })
    }
}
