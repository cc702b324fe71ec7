//! Verdant — Plants bounded context.
//!
//! Owns individual plants through their lifecycle, including the transplant
//! use case that spans a plant and its source/target growing units.

pub mod application;
pub mod domain;
