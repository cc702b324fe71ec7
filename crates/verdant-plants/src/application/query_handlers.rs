//! Cross-context query handlers served by the Plants read side.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::query::QueryHandler;
use verdant_core::repository::ReadRepository;

use super::view_models::PlantView;

/// Query tag: plant summaries for a list of ids, in request order. Params:
/// `{ "plant_ids": [<uuid>, ...] }`; result: an array of summary documents.
/// Unknown ids are skipped rather than erroring — the caller is rebuilding
/// a view and a missing plant just means its delete event won the race.
pub const PLANT_SUMMARIES_BY_IDS: &str = "plant.summaries_by_ids";

/// Parameters of the `plant.summaries_by_ids` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantSummariesParams {
    /// The plants to resolve.
    pub plant_ids: Vec<Uuid>,
}

/// The summary shape served to other contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantSummaryDoc {
    /// The plant's id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Species label.
    pub species: String,
    /// Lifecycle status tag.
    pub status: String,
}

/// Serves `plant.summaries_by_ids` from the plant view collection.
pub struct PlantSummariesHandler {
    views: Arc<dyn ReadRepository<PlantView>>,
}

impl PlantSummariesHandler {
    /// Creates a handler reading from the given repository.
    #[must_use]
    pub fn new(views: Arc<dyn ReadRepository<PlantView>>) -> Self {
        Self { views }
    }
}

#[async_trait]
impl QueryHandler for PlantSummariesHandler {
    fn query_type(&self) -> &'static str {
        PLANT_SUMMARIES_BY_IDS
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let params: PlantSummariesParams =
            serde_json::from_value(params.clone()).map_err(|e| {
                DomainError::Validation(format!("malformed plant.summaries_by_ids params: {e}"))
            })?;

        let mut summaries = Vec::with_capacity(params.plant_ids.len());
        for plant_id in params.plant_ids {
            if let Some(view) = self.views.find_by_id(ctx, plant_id).await? {
                summaries.push(PlantSummaryDoc {
                    id: view.id,
                    name: view.name,
                    species: view.species,
                    status: view.status,
                });
            }
        }

        serde_json::to_value(summaries)
            .map_err(|e| DomainError::Store(format!("plant summary serialization failed: {e}")))
    }
}
