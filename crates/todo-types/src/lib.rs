//! Foundation types for the todo service.
//!
//! Every other crate in the workspace depends on `todo-types`. The types here
//! carry no behaviour beyond construction, projection and matching; storage,
//! lifecycle rules and synchronization live in their own crates.
//!
//! # Key Types
//!
//! - [`ItemId`] -- Store-assigned integer identity of a record
//! - [`TodoItem`] -- The persisted record, including internal-only fields
//! - [`NewItem`] -- A record before the store has assigned its identity
//! - [`ItemChanges`] -- The field set a lifecycle update writes
//! - [`ItemView`] -- The external representation exposed across the service boundary
//! - [`ItemFilter`] -- Predicate used by store scans and search

pub mod filter;
pub mod id;
pub mod item;
pub mod request;
pub mod view;

pub use filter::ItemFilter;
pub use id::ItemId;
pub use item::{ItemChanges, NewItem, TodoItem};
pub use request::{CreateItem, UpdateItem};
pub use view::ItemView;
