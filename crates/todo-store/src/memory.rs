use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use todo_types::{ItemChanges, ItemFilter, ItemId, NewItem, TodoItem};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::scan::ItemScan;
use crate::traits::ItemStore;

#[derive(Debug)]
struct MemoryState {
    items: BTreeMap<ItemId, TodoItem>,
    next_id: i64,
}

/// In-memory, map-based item store.
///
/// Intended for tests and for running without a database. All records are
/// held behind a single `RwLock`, so every write is atomic. Identities start
/// at 1 and are never reused, even after deletes.
pub struct InMemoryItemStore {
    state: RwLock<MemoryState>,
}

impl InMemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.items.len())
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_state()?.items.is_empty())
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn create(&self, item: NewItem) -> StoreResult<ItemId> {
        let mut state = self.write_state()?;
        let id = ItemId::new(state.next_id);
        state.next_id += 1;
        state.items.insert(id, item.into_item(id));
        debug!(%id, "inserted item");
        Ok(id)
    }

    async fn find(&self, id: ItemId) -> StoreResult<Option<TodoItem>> {
        Ok(self.read_state()?.items.get(&id).cloned())
    }

    async fn update(
        &self,
        id: ItemId,
        expected_version: u64,
        changes: &ItemChanges,
    ) -> StoreResult<TodoItem> {
        let mut state = self.write_state()?;
        let item = state.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if item.version != expected_version {
            debug!(%id, expected_version, found = item.version, "stale update rejected");
            return Err(StoreError::Conflict {
                id,
                expected: expected_version,
            });
        }
        item.apply(changes);
        debug!(%id, version = item.version, "updated item");
        Ok(item.clone())
    }

    async fn mark_synchronized(&self, id: ItemId) -> StoreResult<bool> {
        let mut state = self.write_state()?;
        match state.items.get_mut(&id) {
            Some(item) => {
                item.synchronized = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ItemId) -> StoreResult<bool> {
        let removed = self.write_state()?.items.remove(&id).is_some();
        debug!(%id, removed, "delete item");
        Ok(removed)
    }

    async fn scan(&self, filter: &ItemFilter) -> StoreResult<ItemScan> {
        let state = self.read_state()?;
        Ok(state
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn exists(&self, id: ItemId) -> StoreResult<bool> {
        Ok(self.read_state()?.items.contains_key(&id))
    }
}

impl std::fmt::Debug for InMemoryItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryItemStore")
            .field("item_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn new_item(name: &str) -> NewItem {
        NewItem::new(Some(name.to_string()), at(1_000))
    }

    fn changes(name: Option<&str>, is_complete: bool) -> ItemChanges {
        ItemChanges {
            name: name.map(str::to_string),
            is_complete,
            updated_at: at(2_000),
        }
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_and_find() {
        let store = InMemoryItemStore::new();
        let id = store.create(new_item("Buy milk")).await.unwrap();
        assert_eq!(id, ItemId::new(1));

        let item = store.find(id).await.unwrap().expect("should exist");
        assert_eq!(item.name.as_deref(), Some("Buy milk"));
        assert_eq!(item.created_at, at(1_000));
        assert_eq!(item.version, 1);
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let store = InMemoryItemStore::new();
        assert!(store.find(ItemId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = InMemoryItemStore::new();
        let first = store.create(new_item("a")).await.unwrap();
        assert!(store.delete(first).await.unwrap());
        let second = store.create(new_item("b")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(second, ItemId::new(2));
    }

    #[tokio::test]
    async fn delete_twice() {
        let store = InMemoryItemStore::new();
        let id = store.create(new_item("x")).await.unwrap();
        assert!(store.delete(id).await.unwrap());
        assert!(!store.exists(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
    }

    // -----------------------------------------------------------------------
    // Optimistic concurrency
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn update_with_current_version() {
        let store = InMemoryItemStore::new();
        let id = store.create(new_item("old")).await.unwrap();
        let updated = store.update(id, 1, &changes(Some("new"), true)).await.unwrap();
        assert_eq!(updated.name.as_deref(), Some("new"));
        assert!(updated.is_complete);
        assert_eq!(updated.updated_at, Some(at(2_000)));
        assert_eq!(updated.created_at, at(1_000));
        assert_eq!(updated.version, 2);

        let stored = store.find(id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let store = InMemoryItemStore::new();
        let id = store.create(new_item("x")).await.unwrap();
        store.update(id, 1, &changes(None, true)).await.unwrap();

        let err = store.update(id, 1, &changes(None, false)).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(store.find(id).await.unwrap().unwrap().is_complete);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = InMemoryItemStore::new();
        let err = store
            .update(ItemId::new(5), 1, &changes(None, true))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == ItemId::new(5)));
    }

    // -----------------------------------------------------------------------
    // Synchronized flag
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn mark_synchronized_keeps_version() {
        let store = InMemoryItemStore::new();
        let id = store.create(new_item("x")).await.unwrap();
        assert!(store.mark_synchronized(id).await.unwrap());

        let item = store.find(id).await.unwrap().unwrap();
        assert!(item.synchronized);
        assert_eq!(item.version, 1);
        // A lifecycle update read before the flag was set still goes through.
        let updated = store.update(id, 1, &changes(None, true)).await.unwrap();
        assert!(updated.synchronized);
    }

    #[tokio::test]
    async fn mark_synchronized_missing() {
        let store = InMemoryItemStore::new();
        assert!(!store.mark_synchronized(ItemId::new(1)).await.unwrap());
    }

    // -----------------------------------------------------------------------
    // Scan
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn scan_applies_filter() {
        let store = InMemoryItemStore::new();
        store.create(new_item("Buy Milk")).await.unwrap();
        store.create(new_item("Walk dog")).await.unwrap();
        store.create(NewItem::new(None, at(1_000))).await.unwrap();

        assert_eq!(store.scan(&ItemFilter::All).await.unwrap().len(), 3);
        let hits = store.scan(&ItemFilter::name_contains("MILK")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.iter().next().unwrap().name.as_deref(), Some("Buy Milk"));
        assert_eq!(store.scan(&ItemFilter::name_contains("")).await.unwrap().len(), 2);
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_allocate_unique_ids() {
        let store = Arc::new(InMemoryItemStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(new_item(&format!("item {i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap().unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(store.len().unwrap(), 32);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn only_one_racing_update_wins() {
        let store = Arc::new(InMemoryItemStore::new());
        let id = store.create(new_item("contended")).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.update(id, 1, &changes(None, true)).await })
            })
            .collect();

        let mut wins = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => wins += 1,
                Err(e) => assert!(e.is_conflict()),
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.find(id).await.unwrap().unwrap().version, 2);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryItemStore::default();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryItemStore"));
        assert!(debug.contains("item_count"));
        assert!(store.is_empty().unwrap());
    }
}
