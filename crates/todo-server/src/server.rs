use std::sync::Arc;

use tokio::net::TcpListener;
use todo_lifecycle::ItemService;
use todo_store::{InMemoryItemStore, ItemStore, PostgresItemStore};
use todo_sync::{DisabledMirror, HttpMirror, MirrorClient};

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;

/// Todo HTTP server.
pub struct TodoServer {
    config: ServerConfig,
}

impl TodoServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wire the store and mirror described by the config into an [`ItemService`].
    pub async fn build_service(&self) -> ServerResult<ItemService> {
        let store: Arc<dyn ItemStore> = match &self.config.database_url {
            Some(url) => {
                let store = PostgresItemStore::connect(url, self.config.max_connections).await?;
                store.ensure_schema().await?;
                Arc::new(store)
            }
            None => {
                tracing::warn!("no database_url configured; items are kept in memory");
                Arc::new(InMemoryItemStore::new())
            }
        };
        Ok(ItemService::new(store, self.mirror()))
    }

    fn mirror(&self) -> Arc<dyn MirrorClient> {
        let mirror = &self.config.mirror;
        if mirror.enabled {
            Arc::new(HttpMirror::new(mirror.endpoint.clone(), mirror.timeout()))
        } else {
            Arc::new(DisabledMirror)
        }
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.build_service().await?);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            mirror = %self.config.mirror.endpoint,
            mirror_enabled = self.config.mirror.enabled,
            "todo server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
