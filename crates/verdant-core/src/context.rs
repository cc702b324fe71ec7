//! Per-request context.

use uuid::Uuid;

/// Explicit request-scoped value threaded through every repository and bus
/// call. There is no ambient "current request" state anywhere in the core;
/// whoever starts a unit of work creates a context and passes it down.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// Correlation ID tracing one command through its downstream effects.
    pub correlation_id: Uuid,
}

impl RequestContext {
    /// Creates a context with a fresh correlation ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Creates a context continuing an existing correlation.
    #[must_use]
    pub fn with_correlation_id(correlation_id: Uuid) -> Self {
        Self { correlation_id }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
