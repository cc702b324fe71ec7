//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// The variants mirror the failure taxonomy of the write pipeline: validation
/// and not-found errors abort a command before any mutation is durable, store
/// errors abort the remaining steps, and projection errors surface only
/// through the event bus (there is no retry path behind it).
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced aggregate does not exist.
    #[error("{aggregate_type} not found: {id}")]
    NotFound {
        /// Type tag of the missing aggregate.
        aggregate_type: &'static str,
        /// The identifier that failed to resolve.
        id: Uuid,
    },

    /// A domain invariant was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// A write- or read-store operation failed.
    #[error("store error: {0}")]
    Store(String),

    /// A projection handler failed to rebuild its view model.
    #[error("projection error: {0}")]
    Projection(String),

    /// No handler is registered for a cross-context query type.
    #[error("no query handler registered for {0}")]
    UnhandledQuery(&'static str),
}
