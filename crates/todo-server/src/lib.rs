//! HTTP server for the todo service.
//!
//! Exposes the item lifecycle as a small REST API under `/items`, plus
//! `/health` and `/info`. Storage and mirroring are chosen from
//! [`ServerConfig`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{MirrorConfig, ServerConfig};
pub use error::{ErrorBody, ServerError, ServerResult};
pub use router::build_router;
pub use server::TodoServer;
