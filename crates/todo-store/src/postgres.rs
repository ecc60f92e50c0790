//! PostgreSQL item store.
//!
//! One row per record in `todo_items`; identities come from a `BIGSERIAL`
//! column and the `version` column carries the optimistic-concurrency token.
//! Name search is evaluated in SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use todo_types::{ItemChanges, ItemFilter, ItemId, NewItem, TodoItem};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::scan::ItemScan;
use crate::traits::ItemStore;

/// DDL for the items table. Applied by [`PostgresItemStore::ensure_schema`].
pub const SCHEMA: &str = r#"CREATE TABLE IF NOT EXISTS todo_items (
    id           BIGSERIAL PRIMARY KEY,
    name         TEXT NULL,
    is_complete  BOOLEAN NOT NULL DEFAULT FALSE,
    secret       TEXT NULL,
    created_at   TIMESTAMPTZ NOT NULL,
    updated_at   TIMESTAMPTZ NULL,
    synchronized BOOLEAN NOT NULL DEFAULT FALSE,
    version      BIGINT NOT NULL DEFAULT 1
)"#;

const COLUMNS: &str =
    "id, name, is_complete, secret, created_at, updated_at, synchronized, version";

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: Option<String>,
    is_complete: bool,
    secret: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    synchronized: bool,
    version: i64,
}

impl TryFrom<ItemRow> for TodoItem {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> StoreResult<Self> {
        let id = ItemId::new(row.id);
        let version = u64::try_from(row.version).map_err(|_| StoreError::Corrupt {
            id,
            reason: format!("negative version {}", row.version),
        })?;
        Ok(TodoItem {
            id,
            name: row.name,
            is_complete: row.is_complete,
            secret: row.secret,
            created_at: row.created_at,
            updated_at: row.updated_at,
            synchronized: row.synchronized,
            version,
        })
    }
}

fn version_param(id: ItemId, version: u64) -> StoreResult<i64> {
    i64::try_from(version).map_err(|_| StoreError::Conflict {
        id,
        expected: version,
    })
}

/// PostgreSQL implementation of [`ItemStore`].
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!(max_connections, "connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Create the items table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn create(&self, item: NewItem) -> StoreResult<ItemId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO todo_items \
             (name, is_complete, secret, created_at, updated_at, synchronized, version) \
             VALUES ($1, $2, $3, $4, $5, $6, 1) RETURNING id",
        )
        .bind(item.name)
        .bind(item.is_complete)
        .bind(item.secret)
        .bind(item.created_at)
        .bind(item.updated_at)
        .bind(item.synchronized)
        .fetch_one(&self.pool)
        .await?;
        debug!(id, "inserted item");
        Ok(ItemId::new(id))
    }

    async fn find(&self, id: ItemId) -> StoreResult<Option<TodoItem>> {
        let row: Option<ItemRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM todo_items WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await?;
        row.map(TodoItem::try_from).transpose()
    }

    async fn update(
        &self,
        id: ItemId,
        expected_version: u64,
        changes: &ItemChanges,
    ) -> StoreResult<TodoItem> {
        // Zero rows means the row vanished or its version moved; both are conflicts here.
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            "UPDATE todo_items \
             SET name = COALESCE($3, name), is_complete = $4, updated_at = $5, \
                 version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(id.get())
        .bind(version_param(id, expected_version)?)
        .bind(changes.name.as_deref())
        .bind(changes.is_complete)
        .bind(changes.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => TodoItem::try_from(row),
            None => {
                debug!(%id, expected_version, "stale update rejected");
                Err(StoreError::Conflict {
                    id,
                    expected: expected_version,
                })
            }
        }
    }

    async fn mark_synchronized(&self, id: ItemId) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE todo_items SET synchronized = TRUE WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ItemId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn scan(&self, filter: &ItemFilter) -> StoreResult<ItemScan> {
        let rows: Vec<ItemRow> = match filter {
            ItemFilter::All => {
                sqlx::query_as(&format!("SELECT {COLUMNS} FROM todo_items ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
            ItemFilter::NameContains(needle) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM todo_items \
                     WHERE name IS NOT NULL AND strpos(lower(name), lower($1)) > 0 \
                     ORDER BY id"
                ))
                .bind(needle.as_str())
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.into_iter()
            .map(TodoItem::try_from)
            .collect::<StoreResult<Vec<_>>>()
            .map(ItemScan::new)
    }

    async fn exists(&self, id: ItemId) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM todo_items WHERE id = $1)")
                .bind(id.get())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
