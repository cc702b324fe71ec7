//! Cross-context query bus.
//!
//! Projection handlers use this to pull data owned by another bounded
//! context (e.g. the growing-unit projection pulling a location view)
//! without a crate dependency on the owning context. Queries and results
//! travel as JSON documents; the tags are the contract.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::DomainError;

/// A query addressed to whichever context registered a handler for its tag.
#[derive(Debug, Clone)]
pub struct CrossContextQuery {
    /// Query tag used for handler routing (e.g. `"location.by_id"`).
    pub query_type: &'static str,
    /// Query parameters as a JSON document.
    pub params: serde_json::Value,
}

impl CrossContextQuery {
    /// Builds a query.
    #[must_use]
    pub fn new(query_type: &'static str, params: serde_json::Value) -> Self {
        Self { query_type, params }
    }
}

/// A context-owned resolver for one query tag.
#[async_trait]
pub trait QueryHandler: Send + Sync {
    /// The query tag this handler resolves.
    fn query_type(&self) -> &'static str;

    /// Resolves the query.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the parameters are malformed or the
    /// backing read store fails.
    async fn handle(
        &self,
        ctx: &RequestContext,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Registry-backed dispatcher, one handler per query tag, populated by
/// explicit registration calls at process start.
#[derive(Default)]
pub struct QueryBus {
    handlers: HashMap<&'static str, Arc<dyn QueryHandler>>,
}

impl QueryBus {
    /// Creates a bus with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its query tag. A later registration for the
    /// same tag replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn QueryHandler>) {
        self.handlers.insert(handler.query_type(), handler);
    }

    /// Resolves a query through its registered handler.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnhandledQuery` when no handler is registered
    /// for the tag, or the handler's own error.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        query: &CrossContextQuery,
    ) -> Result<serde_json::Value, DomainError> {
        let handler = self
            .handlers
            .get(query.query_type)
            .ok_or(DomainError::UnhandledQuery(query.query_type))?;
        handler.handle(ctx, &query.params).await
    }
}
