use todo_types::ItemId;

/// Errors from item store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record does not exist.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// The record was deleted or changed since it was read.
    #[error("concurrent modification of item {id}: expected version {expected}")]
    Conflict { id: ItemId, expected: u64 },

    /// The stored row cannot be turned back into a record.
    #[error("corrupt item {id}: {reason}")]
    Corrupt { id: ItemId, reason: String },

    /// The storage medium cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Error reported by the database driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns `true` for optimistic-concurrency rejections.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
