use std::sync::Arc;

use todo_types::ItemFilter;

use crate::error::StoreResult;
use crate::scan::ItemScan;
use crate::traits::ItemStore;

/// Case-insensitive substring search over item names.
///
/// A linear scan through the store, not an index: stores make no promise of
/// indexed lookup on `name`.
#[derive(Clone)]
pub struct SearchAccessor {
    store: Arc<dyn ItemStore>,
}

impl SearchAccessor {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Records whose name contains `query`, ignoring case.
    ///
    /// Unnamed records never match; an empty query matches every named record.
    pub async fn search(&self, query: &str) -> StoreResult<ItemScan> {
        self.store.scan(&ItemFilter::name_contains(query)).await
    }
}

impl std::fmt::Debug for SearchAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAccessor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryItemStore;
    use chrono::Utc;
    use todo_types::NewItem;

    async fn seeded() -> SearchAccessor {
        let store = Arc::new(InMemoryItemStore::new());
        for name in [Some("Buy Milk"), Some("milkshake"), Some("Walk dog"), None] {
            store
                .create(NewItem::new(name.map(str::to_string), Utc::now()))
                .await
                .unwrap();
        }
        SearchAccessor::new(store)
    }

    #[tokio::test]
    async fn matches_regardless_of_case() {
        let search = seeded().await;
        for q in ["milk", "MILK", "Milk"] {
            let hits = search.search(q).await.unwrap();
            let mut names: Vec<_> = hits.into_iter().filter_map(|item| item.name).collect();
            names.sort();
            assert_eq!(names, vec!["Buy Milk".to_string(), "milkshake".to_string()]);
        }
    }

    #[tokio::test]
    async fn empty_query_matches_named_records_only() {
        let search = seeded().await;
        assert_eq!(search.search("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn no_match_is_empty() {
        let search = SearchAccessor::new(Arc::new(InMemoryItemStore::new()));
        assert!(search.search("milk").await.unwrap().is_empty());
    }
}
