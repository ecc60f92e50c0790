use async_trait::async_trait;
use todo_types::{ItemChanges, ItemFilter, ItemId, NewItem, TodoItem};

use crate::error::StoreResult;
use crate::scan::ItemScan;

/// Durable storage for todo records.
///
/// All implementations must satisfy these invariants:
/// - `create` allocates a fresh identity that no other live record holds.
/// - `update` succeeds only when the stored version equals `expected_version`,
///   and bumps the version on success.
/// - `mark_synchronized` touches nothing but the synchronized flag.
/// - Every individual write is atomic with respect to concurrent callers.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persist a new record and return its identity.
    async fn create(&self, item: NewItem) -> StoreResult<ItemId>;

    /// Point lookup. Returns `Ok(None)` if the record does not exist.
    async fn find(&self, id: ItemId) -> StoreResult<Option<TodoItem>>;

    /// Write lifecycle changes to a record last observed at `expected_version`.
    ///
    /// Returns the record as stored after the write. Fails with
    /// [`crate::StoreError::Conflict`] if the record changed or disappeared
    /// since it was read; backends that can tell a missing row apart may
    /// return [`crate::StoreError::NotFound`] instead.
    async fn update(
        &self,
        id: ItemId,
        expected_version: u64,
        changes: &ItemChanges,
    ) -> StoreResult<TodoItem>;

    /// Set the synchronized flag. Returns `false` if the record is gone.
    async fn mark_synchronized(&self, id: ItemId) -> StoreResult<bool>;

    /// Remove a record. Returns `true` if it existed.
    async fn delete(&self, id: ItemId) -> StoreResult<bool>;

    /// Snapshot of every record the filter accepts, in unspecified order.
    async fn scan(&self, filter: &ItemFilter) -> StoreResult<ItemScan>;

    /// Check whether a record exists.
    ///
    /// Default implementation goes through `find()`.
    async fn exists(&self, id: ItemId) -> StoreResult<bool> {
        Ok(self.find(id).await?.is_some())
    }
}
