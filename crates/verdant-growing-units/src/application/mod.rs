//! Application layer of the Growing Units context.

pub mod command_handlers;
pub mod integration_events;
pub mod projections;
pub mod queries;
pub mod view_models;
