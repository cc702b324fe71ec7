//! Aggregate root for the Locations context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::aggregate::{AggregateRoot, EventBuffer, Persistable};
use verdant_core::clock::Clock;
use verdant_core::error::DomainError;
use verdant_core::event::DomainEvent;

use super::events::{LOCATION_CREATED, LOCATION_DELETED, LOCATION_UPDATED};

/// Type tag stamped onto every location event.
pub const LOCATION_AGGREGATE_TYPE: &str = "Location";

/// A physical place plants are organized into.
#[derive(Debug, Clone)]
pub struct Location {
    id: Uuid,
    name: String,
    description: Option<String>,
    covered: bool,
    events: EventBuffer,
}

/// Primitive representation of a `Location`, used for persistence and as
/// event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPrimitives {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Display name, non-empty.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the location is covered (greenhouse, indoors).
    pub covered: bool,
}

impl Location {
    /// Creates a new location, buffering a `location.created` event unless
    /// `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty.
    pub fn create(
        id: Uuid,
        name: &str,
        description: Option<String>,
        covered: bool,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<Self, DomainError> {
        let mut location = Self {
            id,
            name: validated_name(name)?,
            description: normalized(description),
            covered,
            events: EventBuffer::new(),
        };
        if emit_event {
            location.record(LOCATION_CREATED, clock);
        }
        Ok(location)
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

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the location is covered.
    #[must_use]
    pub fn covered(&self) -> bool {
        self.covered
    }

    /// Replaces the location's details, buffering a `location.updated` event
    /// unless `emit_event` is false.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the new name is empty.
    pub fn update_details(
        &mut self,
        name: &str,
        description: Option<String>,
        covered: bool,
        clock: &dyn Clock,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        self.name = validated_name(name)?;
        self.description = normalized(description);
        self.covered = covered;
        if emit_event {
            self.record(LOCATION_UPDATED, clock);
        }
        Ok(())
    }

    /// Marks the location deleted, buffering a `location.deleted` event
    /// unless `emit_event` is false. Removing the record is the command
    /// handler's job.
    pub fn delete(&mut self, clock: &dyn Clock, emit_event: bool) {
        if emit_event {
            self.record(LOCATION_DELETED, clock);
        }
    }

    fn record(&mut self, event_type: &'static str, clock: &dyn Clock) {
        let payload = serde_json::to_value(self.to_primitives())
            .expect("LocationPrimitives serialization is infallible");
        self.events.record(DomainEvent::new(
            self.id,
            LOCATION_AGGREGATE_TYPE,
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
            "location name must not be empty".into(),
        ));
    }
    Ok(trimmed.to_owned())
}

fn normalized(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

impl AggregateRoot for Location {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn aggregate_type(&self) -> &'static str {
        LOCATION_AGGREGATE_TYPE
    }

    fn uncommitted_events(&self) -> &[DomainEvent] {
        self.events.as_slice()
    }

    fn commit(&mut self) {
        self.events.clear();
    }
}

impl Persistable for Location {
    type Primitives = LocationPrimitives;

    fn to_primitives(&self) -> LocationPrimitives {
        LocationPrimitives {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            covered: self.covered,
        }
    }

    fn from_primitives(primitives: LocationPrimitives) -> Result<Self, DomainError> {
        Ok(Self {
            id: primitives.id,
            name: validated_name(&primitives.name)?,
            description: normalized(primitives.description),
            covered: primitives.covered,
            events: EventBuffer::new(),
        })
    }
}
