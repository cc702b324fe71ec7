//! Application layer of the Plants context.

pub mod command_handlers;
pub mod integration_events;
pub mod projections;
pub mod query_handlers;
pub mod view_models;
