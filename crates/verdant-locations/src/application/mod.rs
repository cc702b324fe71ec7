//! Application layer of the Locations context.

pub mod command_handlers;
pub mod integration_events;
pub mod projections;
pub mod query_handlers;
pub mod view_models;
