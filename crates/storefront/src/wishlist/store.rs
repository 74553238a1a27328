//! Wishlist store: in-memory wishlist synchronized with a storage slot.

use cricket_sphere_core::{AddOutcome, VariantId, Wishlist, WishlistError, WishlistItem};

use super::storage::{StorageError, WishlistStorage};

/// Storage key of the persisted wishlist.
pub const WISHLIST_STORAGE_KEY: &str = "cricket-sphere-wishlist";

/// Authoritative wishlist for one visitor.
///
/// The in-memory [`Wishlist`] is the source of truth. Every mutation that
/// changes it is followed by a [`save`](Self::save) once the store has been
/// hydrated by [`load`](Self::load); mutations made before hydration never
/// write, so they cannot clobber the persisted list.
///
/// Storage errors are logged and swallowed. If the backend reports itself
/// unavailable the store stops touching it and keeps working in memory.
/// Short-lived callers that must know whether a change reached storage can
/// check [`take_save_error`](Self::take_save_error).
#[derive(Debug)]
pub struct WishlistStore<S> {
    storage: S,
    items: Wishlist,
    hydrated: bool,
    degraded: bool,
    changed_before_hydration: bool,
    save_error: Option<StorageError>,
}

impl<S: WishlistStorage> WishlistStore<S> {
    /// Create a store that has not read its storage yet.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            items: Wishlist::new(),
            hydrated: false,
            degraded: false,
            changed_before_hydration: false,
            save_error: None,
        }
    }

    /// Create a store and hydrate it immediately.
    #[must_use]
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Limit the number of entries. `None` means unbounded.
    #[must_use]
    pub fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.items = std::mem::take(&mut self.items).with_max_items(max_items);
        self
    }

    /// Hydrate from storage. Only the first call has any effect.
    ///
    /// A missing value leaves the wishlist as it is. A value that is not a
    /// JSON array is logged and treated as missing. Entries of the array that
    /// fail to decode are logged and skipped, and the rest are kept. In both
    /// cases the slot is rewritten with what was recovered. Mutations made
    /// before hydration are discarded when a persisted list is found, and
    /// saved otherwise.
    pub fn load(&mut self) {
        if self.hydrated {
            return;
        }

        let (persisted, needs_rewrite) = self.read_persisted();
        let replaced = persisted.is_some();
        if let Some(list) = persisted {
            let max_items = self.items.max_items();
            self.items = list.with_max_items(max_items);
        }

        self.hydrated = true;
        tracing::debug!(
            count = self.items.len(),
            replaced,
            degraded = self.degraded,
            "Wishlist hydrated"
        );

        if needs_rewrite || (!replaced && self.changed_before_hydration) {
            self.save();
        }
        self.changed_before_hydration = false;
    }

    /// Write the full wishlist to storage.
    ///
    /// Does nothing before hydration. After the backend was found
    /// unavailable nothing is written. Failures are logged, never returned;
    /// the most recent one is kept for [`take_save_error`](Self::take_save_error).
    pub fn save(&mut self) {
        if !self.hydrated {
            tracing::debug!("Skipping wishlist save before hydration");
            return;
        }
        if self.degraded {
            self.save_error = Some(StorageError::Unavailable(
                "storage disabled after an earlier failure".to_string(),
            ));
            return;
        }

        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode wishlist");
                self.save_error = Some(StorageError::Io(e.into()));
                return;
            }
        };

        match self.storage.set(WISHLIST_STORAGE_KEY, &encoded) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                if let StorageError::Unavailable(reason) = &e {
                    tracing::warn!(%reason, "Wishlist storage unavailable, keeping wishlist in memory");
                    self.degraded = true;
                } else {
                    tracing::warn!(error = %e, "Failed to save wishlist");
                }
                self.save_error = Some(e);
            }
        }
    }

    /// Take the error of the last failed save, if the last save failed.
    pub fn take_save_error(&mut self) -> Option<StorageError> {
        self.save_error.take()
    }

    /// Add an item unless its variant is already wishlisted.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError`] if the item is invalid or the wishlist is
    /// full. Nothing is saved in that case.
    pub fn add(&mut self, item: WishlistItem) -> Result<AddOutcome, WishlistError> {
        let outcome = self.items.add(item)?;
        if outcome.is_added() {
            self.changed();
        }
        Ok(outcome)
    }

    /// Remove the entry for `variant_id`, if present.
    pub fn remove(&mut self, variant_id: &VariantId) -> Option<WishlistItem> {
        let removed = self.items.remove(variant_id);
        if removed.is_some() {
            self.changed();
        }
        removed
    }

    /// Whether `variant_id` is wishlisted.
    #[must_use]
    pub fn contains(&self, variant_id: &VariantId) -> bool {
        self.items.contains(variant_id)
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.clear();
        self.changed();
        removed
    }

    /// Number of entries.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.items.len()
    }

    /// The current wishlist.
    #[must_use]
    pub const fn items(&self) -> &Wishlist {
        &self.items
    }

    /// Whether [`load`](Self::load) has run.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Whether the backend was found unavailable and persistence is off.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn changed(&mut self) {
        if self.hydrated {
            self.save();
        } else {
            self.changed_before_hydration = true;
        }
    }

    /// Returns the decoded list, if any, and whether the slot should be
    /// rewritten because part or all of it could not be decoded.
    fn read_persisted(&mut self) -> (Option<Wishlist>, bool) {
        let raw = match self.storage.get(WISHLIST_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (None, false),
            Err(StorageError::Unavailable(reason)) => {
                tracing::warn!(%reason, "Wishlist storage unavailable, keeping wishlist in memory");
                self.degraded = true;
                return (None, false);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted wishlist");
                return (None, false);
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse persisted wishlist, starting empty");
                return (None, true);
            }
        };

        let total = entries.len();
        let items: Vec<WishlistItem> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable wishlist entry");
                    None
                }
            })
            .collect();
        let dropped = total - items.len();

        (Some(Wishlist::from(items)), dropped > 0)
    }
}
