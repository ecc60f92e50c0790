use thiserror::Error;
use todo_types::ItemId;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("storage error: {0}")]
    Storage(#[from] todo_store::StoreError),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
