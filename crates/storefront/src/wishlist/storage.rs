//! Storage port for the wishlist slot.

use std::collections::HashMap;

use thiserror::Error;

/// Errors a storage backend can report.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used at all (no session, no data directory...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value is larger than the backend accepts.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// Size of the rejected value.
        needed: usize,
        /// Maximum accepted size.
        limit: usize,
    },

    /// The key cannot be stored by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A durable string key-value store.
///
/// Mirrors the capability of browser local storage: whole values are read and
/// written by key, with no partial updates and no change notifications.
pub trait WishlistStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// Can be configured to behave like an unavailable backend or one with a byte
/// quota, so failure handling can be exercised without a real medium.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    unavailable: bool,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStorage {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails with [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Reject writes whose value exceeds `bytes`.
    #[must_use]
    pub const fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Write a raw value directly, bypassing quota and availability.
    ///
    /// Simulates another writer touching the slot.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of successful `set` calls.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl WishlistStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                needed: value.len(),
                limit,
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
