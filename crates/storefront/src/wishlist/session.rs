//! Session-backed storage slot.
//!
//! tower-sessions is async while the store is synchronous, so a request reads
//! the slot up front, runs the store against the snapshot, then flushes any
//! buffered write back to the session.

use tower_sessions::Session;

use super::storage::{StorageError, WishlistStorage};

/// Snapshot of one session value with a buffered write.
#[derive(Debug, Clone)]
pub struct SessionSlot {
    key: String,
    value: Option<String>,
    available: bool,
    pending: bool,
}

impl SessionSlot {
    /// Read `key` from the session.
    ///
    /// A session read failure yields an unavailable slot rather than an error.
    pub async fn read(session: &Session, key: &str) -> Self {
        match session.get::<String>(key).await {
            Ok(value) => Self {
                key: key.to_string(),
                value,
                available: true,
                pending: false,
            },
            Err(e) => {
                tracing::warn!(error = %e, key, "Failed to read session slot");
                Self::unavailable(key)
            }
        }
    }

    /// A slot that rejects every read and write.
    #[must_use]
    pub fn unavailable(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
            available: false,
            pending: false,
        }
    }

    /// Whether a write is waiting to be flushed.
    #[must_use]
    pub const fn has_pending_write(&self) -> bool {
        self.pending
    }

    /// Write the buffered value back to the session, if any.
    ///
    /// # Errors
    ///
    /// Returns the session error if the value could not be stored.
    pub async fn flush(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        if !self.pending {
            return Ok(());
        }
        let Some(value) = self.value else {
            return Ok(());
        };
        session.insert(&self.key, value).await.inspect_err(|e| {
            tracing::error!(error = %e, key = %self.key, "Failed to write session slot");
        })
    }

    fn check_key(&self, key: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("session store unreachable".to_string()));
        }
        if key != self.key {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl WishlistStorage for SessionSlot {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_key(key)?;
        Ok(self.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_key(key)?;
        self.value = Some(value.to_string());
        self.pending = true;
        Ok(())
    }
}
