//! Recording and failing repository doubles.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use verdant_core::aggregate::AggregateRoot;
use verdant_core::context::RequestContext;
use verdant_core::criteria::Criteria;
use verdant_core::error::DomainError;
use verdant_core::pagination::PaginatedResult;
use verdant_core::repository::{ReadRepository, WriteRepository};

use crate::call_log::CallLog;

/// A write repository that forwards to an inner repository and records every
/// mutating call (with the aggregate id) in the shared call log.
pub struct RecordingWriteRepository<A> {
    label: &'static str,
    inner: Arc<dyn WriteRepository<A>>,
    log: CallLog,
}

impl<A> RecordingWriteRepository<A> {
    /// Wraps `inner`, labelling log entries with `label`.
    pub fn new(label: &'static str, inner: Arc<dyn WriteRepository<A>>, log: CallLog) -> Self {
        Self { label, inner, log }
    }
}

#[async_trait]
impl<A: AggregateRoot + 'static> WriteRepository<A> for RecordingWriteRepository<A> {
    async fn find_by_id(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<A>, DomainError> {
        self.inner.find_by_id(ctx, id).await
    }

    async fn save(&self, ctx: &RequestContext, aggregate: &A) -> Result<(), DomainError> {
        self.log
            .record(format!("save:{}:{}", self.label, aggregate.aggregate_id()));
        self.inner.save(ctx, aggregate).await
    }

    async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), DomainError> {
        self.log.record(format!("delete:{}:{id}", self.label));
        self.inner.delete(ctx, id).await
    }
}

/// A read repository whose every operation fails with a store error. Used to
/// exercise the error paths of projections and the overview recompute.
#[derive(Debug, Default)]
pub struct FailingReadRepository;

impl FailingReadRepository {
    fn unavailable() -> DomainError {
        DomainError::Store("read store unavailable".into())
    }
}

#[async_trait]
impl<V: Send + Sync + 'static> ReadRepository<V> for FailingReadRepository {
    async fn find_by_id(&self, _ctx: &RequestContext, _id: Uuid) -> Result<Option<V>, DomainError> {
        Err(Self::unavailable())
    }

    async fn find_by_criteria(
        &self,
        _ctx: &RequestContext,
        _criteria: &Criteria,
    ) -> Result<PaginatedResult<V>, DomainError> {
        Err(Self::unavailable())
    }

    async fn save(&self, _ctx: &RequestContext, _view: &V) -> Result<(), DomainError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _ctx: &RequestContext, _id: Uuid) -> Result<(), DomainError> {
        Err(Self::unavailable())
    }
}
