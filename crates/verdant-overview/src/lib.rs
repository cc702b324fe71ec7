//! Verdant — Overview statistics context.
//!
//! Consumes the growing-unit read model in parallel page batches, flattens
//! the nested plants out of it, and computes one garden-wide statistics
//! snapshot. Recomputation is triggered by every plant/growing-unit
//! integration event and is strictly best-effort.

pub mod projections;
pub mod service;
pub mod stats;
pub mod view_models;
