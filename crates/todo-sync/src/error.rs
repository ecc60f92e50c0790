use thiserror::Error;
use todo_types::ItemId;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("mirror timed out after {0} ms")]
    Timeout(u64),

    #[error("mirror rejected item with HTTP {status}")]
    Rejected { status: u16 },

    #[error("mirroring is disabled")]
    Disabled,

    #[error("item {0} was deleted before it could be marked synchronized")]
    ItemGone(ItemId),

    #[error("store error: {0}")]
    Store(#[from] todo_store::StoreError),
}

pub type SyncResult<T> = Result<T, SyncError>;
