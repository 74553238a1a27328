//! Persistent wishlist store.
//!
//! The wishlist lives in a single key-value slot ([`WISHLIST_STORAGE_KEY`])
//! behind the [`WishlistStorage`] port. [`WishlistStore`] hydrates from the
//! slot once, applies mutations in memory, and writes the full list back after
//! every change. Storage failures are logged and never reach the caller.
//!
//! # Adapters
//!
//! - [`MemoryStorage`] - in-process map, used by tests
//! - [`FileStorage`] - one JSON file per key, used by the CLI
//! - [`SessionSlot`] - snapshot of a tower-sessions value, used by the HTTP API

mod file;
mod session;
mod storage;
mod store;

pub use file::FileStorage;
pub use session::SessionSlot;
pub use storage::{MemoryStorage, StorageError, WishlistStorage};
pub use store::{WISHLIST_STORAGE_KEY, WishlistStore};
