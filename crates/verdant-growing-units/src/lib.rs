//! Verdant — Growing Units bounded context.
//!
//! Owns the containers plants grow in (beds, pots, trays, hydroponic
//! systems): their capacity, physical dimensions, and plant membership.
//! Its projection nests plant summaries and the owning location's name,
//! both pulled through the cross-context query bus.

pub mod application;
pub mod domain;
