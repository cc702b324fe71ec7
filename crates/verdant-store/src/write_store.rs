//! In-memory write store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use verdant_core::aggregate::Persistable;
use verdant_core::context::RequestContext;
use verdant_core::error::DomainError;
use verdant_core::repository::WriteRepository;

/// Write-side store holding one aggregate type as primitives keyed by id.
///
/// `save` stores `to_primitives()`; `find_by_id` rehydrates through
/// `from_primitives`, so a loaded aggregate starts with an empty event
/// buffer — no event is ever replayed from this store.
pub struct InMemoryWriteStore<A: Persistable> {
    records: RwLock<HashMap<Uuid, A::Primitives>>,
}

impl<A: Persistable> InMemoryWriteStore<A> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<A: Persistable> Default for InMemoryWriteStore<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A: Persistable + 'static> WriteRepository<A> for InMemoryWriteStore<A> {
    async fn find_by_id(&self, _ctx: &RequestContext, id: Uuid) -> Result<Option<A>, DomainError> {
        let primitives = self
            .records
            .read()
            .map_err(|_| DomainError::Store("write store lock poisoned".into()))?
            .get(&id)
            .cloned();
        primitives.map(A::from_primitives).transpose()
    }

    async fn save(&self, _ctx: &RequestContext, aggregate: &A) -> Result<(), DomainError> {
        self.records
            .write()
            .map_err(|_| DomainError::Store("write store lock poisoned".into()))?
            .insert(aggregate.aggregate_id(), aggregate.to_primitives());
        Ok(())
    }

    async fn delete(&self, _ctx: &RequestContext, id: Uuid) -> Result<(), DomainError> {
        self.records
            .write()
            .map_err(|_| DomainError::Store("write store lock poisoned".into()))?
            .remove(&id);
        Ok(())
    }
}
