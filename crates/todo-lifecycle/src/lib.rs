//! Item lifecycle for the todo service.
//!
//! [`ItemService`] is the single entry point for every item operation. It
//! holds no state of its own: each call reads through the store, applies the
//! field-mutation and timestamp rules, and writes back under optimistic
//! concurrency. Creation is followed by one best-effort mirror attempt.

pub mod error;
pub mod service;

pub use error::{LifecycleError, LifecycleResult};
pub use service::ItemService;

// Re-export key types
pub use todo_types::{CreateItem, ItemId, ItemView, UpdateItem};
