use std::sync::Arc;

use todo_store::ItemStore;
use todo_types::{ItemView, TodoItem};
use tracing::{info, warn};

use crate::error::{SyncError, SyncResult};
use crate::mirror::MirrorClient;

/// Result of a single sync attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The mirror confirmed and the flag was persisted.
    Synchronized,
    /// Nothing was persisted; the item stays unsynchronized.
    Failed { reason: String },
}

impl SyncOutcome {
    pub fn is_synchronized(&self) -> bool {
        matches!(self, Self::Synchronized)
    }
}

/// Performs the one-shot mirror call that follows item creation.
#[derive(Clone)]
pub struct SyncAttempter {
    store: Arc<dyn ItemStore>,
    mirror: Arc<dyn MirrorClient>,
}

impl SyncAttempter {
    pub fn new(store: Arc<dyn ItemStore>, mirror: Arc<dyn MirrorClient>) -> Self {
        Self { store, mirror }
    }

    /// Mirror `item` once and, on success, persist `synchronized = true`.
    ///
    /// Never fails: every error is logged and reported as
    /// [`SyncOutcome::Failed`].
    pub async fn attempt(&self, item: &TodoItem) -> SyncOutcome {
        match self.sync(item).await {
            Ok(()) => {
                info!(id = %item.id, endpoint = self.mirror.endpoint(), "item synchronized");
                SyncOutcome::Synchronized
            }
            Err(error) => {
                warn!(
                    id = %item.id,
                    endpoint = self.mirror.endpoint(),
                    %error,
                    "sync attempt failed; item stays unsynchronized"
                );
                SyncOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    async fn sync(&self, item: &TodoItem) -> SyncResult<()> {
        self.mirror.mirror(&ItemView::from(item)).await?;
        if !self.store.mark_synchronized(item.id).await? {
            return Err(SyncError::ItemGone(item.id));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SyncAttempter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncAttempter")
            .field("endpoint", &self.mirror.endpoint())
            .finish()
    }
}
