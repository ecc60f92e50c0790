use std::sync::Arc;

use chrono::Utc;
use todo_store::{ItemStore, SearchAccessor, StoreError};
use todo_sync::{MirrorClient, SyncAttempter};
use todo_types::{CreateItem, ItemChanges, ItemFilter, ItemId, ItemView, NewItem, UpdateItem};
use tracing::{debug, info};

use crate::error::{LifecycleError, LifecycleResult};

/// Lifecycle manager for todo items.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    sync: SyncAttempter,
    search: SearchAccessor,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, mirror: Arc<dyn MirrorClient>) -> Self {
        Self {
            sync: SyncAttempter::new(Arc::clone(&store), mirror),
            search: SearchAccessor::new(Arc::clone(&store)),
            store,
        }
    }

    /// Every item, unfiltered.
    pub async fn list(&self) -> LifecycleResult<Vec<ItemView>> {
        let scan = self.store.scan(&ItemFilter::All).await?;
        Ok(scan.into_iter().map(ItemView::from).collect())
    }

    pub async fn get(&self, id: ItemId) -> LifecycleResult<ItemView> {
        self.store
            .find(id)
            .await?
            .map(ItemView::from)
            .ok_or(LifecycleError::NotFound(id))
    }

    /// Create an item, then make one mirror attempt before returning.
    ///
    /// New items always start incomplete, with no `updated_at`. The returned
    /// view reflects the sync outcome, but a failed sync never fails creation.
    pub async fn create(&self, request: CreateItem) -> LifecycleResult<ItemView> {
        let new_item = NewItem::new(request.name, Utc::now());
        let id = self.store.create(new_item.clone()).await?;
        let mut item = new_item.into_item(id);
        info!(%id, "item created");

        if self.sync.attempt(&item).await.is_synchronized() {
            item.synchronized = true;
        }
        Ok(ItemView::from(item))
    }

    /// Merge `request` into the stored item.
    ///
    /// A present, non-empty name replaces the stored one; `is_complete` is
    /// always taken from the request; `updated_at` is always refreshed.
    pub async fn update(&self, id: ItemId, request: UpdateItem) -> LifecycleResult<ItemView> {
        let current = self
            .store
            .find(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))?;

        let changes = ItemChanges {
            name: request.name.filter(|name| !name.is_empty()),
            is_complete: request.is_complete,
            updated_at: Utc::now(),
        };

        match self.store.update(id, current.version, &changes).await {
            Ok(updated) => {
                info!(%id, version = updated.version, "item updated");
                Ok(ItemView::from(updated))
            }
            Err(StoreError::NotFound(_)) => Err(LifecycleError::NotFound(id)),
            Err(error) if error.is_conflict() => {
                debug!(%id, %error, "update conflict; re-checking existence");
                if self.store.exists(id).await? {
                    Err(LifecycleError::Storage(error))
                } else {
                    Err(LifecycleError::NotFound(id))
                }
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete(&self, id: ItemId) -> LifecycleResult<()> {
        if self.store.find(id).await?.is_none() {
            return Err(LifecycleError::NotFound(id));
        }
        // A concurrent delete may still win between the lookup and here.
        if !self.store.delete(id).await? {
            return Err(LifecycleError::NotFound(id));
        }
        info!(%id, "item deleted");
        Ok(())
    }

    /// Items whose name contains `query`, ignoring case.
    pub async fn search(&self, query: &str) -> LifecycleResult<Vec<ItemView>> {
        let hits = self.search.search(query).await?;
        Ok(hits.into_iter().map(ItemView::from).collect())
    }
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService")
            .field("sync", &self.sync)
            .finish_non_exhaustive()
    }
}
