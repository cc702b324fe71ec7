//! Write- and read-side repository contracts.
//!
//! The write store and read store are distinct, independently-owned
//! resources: only the write repository may mutate write-store records for
//! its aggregate type, and only the matching read repository may mutate the
//! corresponding view models. No transaction spans the two — durability
//! lives in the write store, the read store is a disposable, rebuildable
//! cache.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::criteria::Criteria;
use crate::error::DomainError;
use crate::pagination::PaginatedResult;

/// Repository for loading and persisting aggregates on the write side.
#[async_trait]
pub trait WriteRepository<A>: Send + Sync {
    /// Loads an aggregate by id, hydrated without replaying events.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` when the store is unreachable or holds a
    /// record that no longer satisfies the aggregate's invariants.
    async fn find_by_id(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<A>, DomainError>;

    /// Persists the aggregate's current state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on persistence failure.
    async fn save(&self, ctx: &RequestContext, aggregate: &A) -> Result<(), DomainError>;

    /// Removes the aggregate's record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on persistence failure.
    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), DomainError>;
}

/// A denormalized, read-optimized projection of aggregate state, owned by
/// the read side. Stored and retrieved as a serializable document.
pub trait ViewModel: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The view's identifier — the same id as its source aggregate.
    fn view_id(&self) -> Uuid;
}

/// Repository over one view-model collection in the read store.
///
/// `save` is an upsert (insert-or-replace by id, never a partial patch),
/// which is what makes projection handlers naturally idempotent.
#[async_trait]
pub trait ReadRepository<V>: Send + Sync {
    /// Loads one view model by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` when the store is unreachable or the
    /// stored document no longer maps to the view type.
    async fn find_by_id(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<V>, DomainError>;

    /// Executes a criteria query and wraps the page in a result envelope.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on query or mapping failure.
    async fn find_by_criteria(
        &self,
        ctx: &RequestContext,
        criteria: &Criteria,
    ) -> Result<PaginatedResult<V>, DomainError>;

    /// Upserts the view model, keyed by its id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on persistence failure.
    async fn save(&self, ctx: &RequestContext, view: &V) -> Result<(), DomainError>;

    /// Removes the view model.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on persistence failure.
    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), DomainError>;
}

/// Assert-exists helper: loads an aggregate or fails the command with
/// `NotFound` before any mutation has happened.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the id does not resolve, or the
/// repository's own error.
pub async fn require_aggregate<A>(
    repo: &dyn WriteRepository<A>,
    ctx: &RequestContext,
    aggregate_type: &'static str,
    id: Uuid,
) -> Result<A, DomainError> {
    repo.find_by_id(ctx, id)
        .await?
        .ok_or(DomainError::NotFound { aggregate_type, id })
}
