//! Cross-context query handlers served by the Locations read side.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::query::QueryHandler;
use verdant_core::repository::ReadRepository;

use super::view_models::LocationView;

/// Query tag: resolve one location view by id. Params:
/// `{ "location_id": <uuid> }`; result: a `LocationView` document, or JSON
/// null when the id is unknown.
pub const LOCATION_BY_ID: &str = "location.by_id";

/// Parameters of the `location.by_id` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationByIdParams {
    /// The location to resolve.
    pub location_id: Uuid,
}

/// Serves `location.by_id` from the location view collection.
pub struct LocationByIdHandler {
    views: Arc<dyn ReadRepository<LocationView>>,
}

impl LocationByIdHandler {
    /// Creates a handler reading from the given repository.
    #[must_use]
    pub fn new(views: Arc<dyn ReadRepository<LocationView>>) -> Self {
        Self { views }
    }
}

#[async_trait]
impl QueryHandler for LocationByIdHandler {
    fn query_type(&self) -> &'static str {
        LOCATION_BY_ID
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let params: LocationByIdParams = serde_json::from_value(params.clone())
            .map_err(|e| DomainError::Validation(format!("malformed location.by_id params: {e}")))?;

        let view = self.views.find_by_id(ctx, params.location_id).await?;
        serde_json::to_value(view)
            .map_err(|e| DomainError::Store(format!("location view serialization failed: {e}")))
    }
}
