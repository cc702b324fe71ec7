//! Domain event tags for the Locations context.
//!
//! Events travel as envelopes (`verdant_core::event::DomainEvent`) whose
//! payload is the aggregate's post-mutation `LocationPrimitives`.

/// Emitted when a location is created.
pub const LOCATION_CREATED: &str = "location.created";

/// Emitted when a location's details change.
pub const LOCATION_UPDATED: &str = "location.updated";

/// Emitted when a location is removed.
pub const LOCATION_DELETED: &str = "location.deleted";
