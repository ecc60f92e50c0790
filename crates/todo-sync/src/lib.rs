//! Best-effort synchronization of new items to an external mirror.
//!
//! Right after an item is created, the [`SyncAttempter`] sends its external
//! view to a mirror endpoint exactly once. A success response flips the
//! item's `synchronized` flag; anything else leaves the item as it was.
//! Failures are absorbed here and never reach the creation path.

pub mod attempter;
pub mod error;
pub mod mirror;

pub use attempter::{SyncAttempter, SyncOutcome};
pub use error::{SyncError, SyncResult};
pub use mirror::{DisabledMirror, HttpMirror, MirrorClient, DEFAULT_MIRROR_ENDPOINT};
