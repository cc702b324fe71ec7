//! In-memory read store over JSON documents.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use verdant_core::context::RequestContext;
use verdant_core::criteria::Criteria;
use verdant_core::error::DomainError;
use verdant_core::pagination::PaginatedResult;
use verdant_core::repository::{ReadRepository, ViewModel};

use crate::criteria_engine;

/// One view-model collection stored as raw JSON documents keyed by view id.
///
/// A `BTreeMap` keeps the unsorted scan order stable across calls, so
/// repeated paginated sweeps see a consistent base ordering. `save` is an
/// upsert: the incoming document replaces whatever was stored under the id,
/// never a partial patch.
#[derive(Debug)]
pub struct InMemoryReadStore<V> {
    docs: RwLock<BTreeMap<Uuid, Value>>,
    _view: PhantomData<fn() -> V>,
}

impl<V> InMemoryReadStore<V> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
            _view: PhantomData,
        }
    }
}

impl<V> Default for InMemoryReadStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> DomainError {
    DomainError::Store("read store lock poisoned".into())
}

fn to_view<V: ViewModel>(doc: &Value) -> Result<V, DomainError> {
    serde_json::from_value(doc.clone())
        .map_err(|e| DomainError::Store(format!("stored document does not map to view model: {e}")))
}

#[async_trait]
impl<V: ViewModel + 'static> ReadRepository<V> for InMemoryReadStore<V> {
    async fn find_by_id(&self, _ctx: &RequestContext, id: Uuid) -> Result<Option<V>, DomainError> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        docs.get(&id).map(|doc| to_view(doc)).transpose()
    }

    async fn find_by_criteria(
        &self,
        _ctx: &RequestContext,
        criteria: &Criteria,
    ) -> Result<PaginatedResult<V>, DomainError> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        let (page, total) = criteria_engine::execute(criteria, docs.values());

        // The row-to-view mapping is the last step, on the page only.
        let items = page
            .into_iter()
            .map(to_view)
            .collect::<Result<Vec<V>, DomainError>>()?;

        let pagination = criteria.effective_pagination();
        Ok(PaginatedResult::new(
            items,
            total,
            pagination.page(),
            pagination.per_page(),
        ))
    }

    async fn save(&self, _ctx: &RequestContext, view: &V) -> Result<(), DomainError> {
        let doc = serde_json::to_value(view)
            .map_err(|e| DomainError::Store(format!("view model serialization failed: {e}")))?;
        self.docs
            .write()
            .map_err(|_| poisoned())?
            .insert(view.view_id(), doc);
        Ok(())
    }

    async fn delete(&self, _ctx: &RequestContext, id: Uuid) -> Result<(), DomainError> {
        self.docs.write().map_err(|_| poisoned())?.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use verdant_core::context::RequestContext;
    use verdant_core::criteria::{Criteria, Filter, FilterOperator, Pagination, Sort};
    use verdant_core::repository::{ReadRepository, ViewModel};

    use super::InMemoryReadStore;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct ShelfView {
        id: Uuid,
        label: String,
        slots: u32,
    }

    impl ViewModel for ShelfView {
        fn view_id(&self) -> Uuid {
            self.id
        }
    }

    fn shelf(label: &str, slots: u32) -> ShelfView {
        ShelfView {
            id: Uuid::new_v4(),
            label: label.to_owned(),
            slots,
        }
    }

    #[tokio::test]
    async fn test_save_is_an_upsert_keyed_by_view_id() {
        let store = InMemoryReadStore::new();
        let ctx = RequestContext::new();
        let mut view = shelf("north wall", 4);

        store.save(&ctx, &view).await.unwrap();
        view.slots = 6;
        store.save(&ctx, &view).await.unwrap();

        let loaded = store.find_by_id(&ctx, view.id).await.unwrap().unwrap();
        assert_eq!(loaded, view);

        let all = store
            .find_by_criteria(&ctx, &Criteria::unfiltered())
            .await
            .unwrap();
        assert_eq!(all.total, 1);
    }

    #[tokio::test]
    async fn test_find_by_criteria_filters_sorts_and_paginates() {
        let store = InMemoryReadStore::new();
        let ctx = RequestContext::new();
        for (label, slots) in [("a", 2), ("b", 8), ("c", 5), ("d", 9)] {
            store.save(&ctx, &shelf(label, slots)).await.unwrap();
        }

        let criteria = Criteria::unfiltered()
            .with_filter(Filter::new("slots", FilterOperator::Gte, 5_i64))
            .with_sort(Sort::ascending("label"))
            .with_pagination(Pagination::new(1, 2));
        let result = store.find_by_criteria(&ctx, &criteria).await.unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.total_pages(), 2);
        let labels: Vec<&str> = result.items.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_page_beyond_the_last_returns_empty_items_with_total() {
        let store = InMemoryReadStore::new();
        let ctx = RequestContext::new();
        for (label, slots) in [("a", 2), ("b", 8), ("c", 5)] {
            store.save(&ctx, &shelf(label, slots)).await.unwrap();
        }

        let criteria = Criteria::unfiltered().with_pagination(Pagination::new(7, 2));
        let result = store.find_by_criteria(&ctx, &criteria).await.unwrap();

        assert!(result.items.is_empty());
        assert_eq!(result.total, 3);
        assert_eq!(result.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_the_document() {
        let store = InMemoryReadStore::new();
        let ctx = RequestContext::new();
        let view = shelf("east bench", 3);
        store.save(&ctx, &view).await.unwrap();

        store.delete(&ctx, view.id).await.unwrap();

        assert!(store.find_by_id(&ctx, view.id).await.unwrap().is_none());
    }
}
