//! Durable record storage for the todo service.
//!
//! The store owns all persisted item state. Callers read a record, decide on
//! changes, and write them back together with the version they observed; the
//! store rejects the write if the record moved on in between.
//!
//! # Storage Backends
//!
//! All backends implement the [`ItemStore`] trait:
//!
//! - [`InMemoryItemStore`] -- map-based store for tests and database-less runs
//! - [`PostgresItemStore`] -- single-table PostgreSQL store over a `sqlx` pool
//!
//! # Design Rules
//!
//! 1. Identities are allocated by the store and never reused.
//! 2. `created_at` is written once, on insert.
//! 3. Lifecycle updates are compare-and-swap on the row version.
//! 4. The synchronized flag is a single-field write that does not bump the version.
//! 5. Scans are materialized snapshots; iterating twice yields the same records.
//! 6. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod scan;
pub mod search;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryItemStore;
pub use postgres::PostgresItemStore;
pub use scan::ItemScan;
pub use search::SearchAccessor;
pub use traits::ItemStore;
