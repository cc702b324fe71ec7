//! Verdant — Locations bounded context.
//!
//! Owns the physical places a garden is organized into (greenhouses, beds,
//! balconies) and answers the `location.by_id` cross-context query from its
//! read side.

pub mod application;
pub mod domain;
