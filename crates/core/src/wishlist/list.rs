//! The wishlist aggregate.

use serde::{Deserialize, Serialize, Serializer};

use super::item::WishlistItem;
use crate::types::VariantId;

/// Errors returned by wishlist mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WishlistError {
    /// The item failed validation.
    #[error("invalid wishlist item: {0}")]
    InvalidItem(&'static str),
    /// The wishlist reached its configured size limit.
    #[error("wishlist is full ({max} items)")]
    Full {
        /// Configured maximum number of entries.
        max: usize,
    },
}

/// Result of [`Wishlist::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended.
    Added,
    /// An entry with the same variant already existed and was kept as is.
    AlreadyPresent,
}

impl AddOutcome {
    /// Whether the collection changed.
    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Ordered wishlist with at most one entry per variant.
///
/// Lookups scan the list linearly; wishlists are sized by human browsing, not
/// by data volume.
///
/// Serializes as a plain JSON array of items. Decoding an array that lists a
/// variant more than once keeps the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<WishlistItem>")]
pub struct Wishlist {
    items: Vec<WishlistItem>,
    max_items: Option<usize>,
}

impl Wishlist {
    /// Create an empty, unbounded wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            max_items: None,
        }
    }

    /// Limit the number of entries `add` will accept.
    ///
    /// Entries already present beyond the limit are kept.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }

    /// Configured size limit, if any.
    #[must_use]
    pub const fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Append an item unless its variant is already on the list.
    ///
    /// An existing entry is never replaced, even if the new item carries a
    /// different title or price.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::InvalidItem`] if the item fails validation and
    /// [`WishlistError::Full`] if a new entry would exceed the size limit. The
    /// collection is unchanged in both cases.
    pub fn add(&mut self, item: WishlistItem) -> Result<AddOutcome, WishlistError> {
        item.validate()?;

        if self.contains(&item.variant_id) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        if let Some(max) = self.max_items
            && self.items.len() >= max
        {
            return Err(WishlistError::Full { max });
        }

        self.items.push(item);
        Ok(AddOutcome::Added)
    }

    /// Remove the entry for `variant_id`, returning it if it was present.
    pub fn remove(&mut self, variant_id: &VariantId) -> Option<WishlistItem> {
        let index = self.position(variant_id)?;
        Some(self.items.remove(index))
    }

    /// Whether an entry exists for `variant_id`.
    #[must_use]
    pub fn contains(&self, variant_id: &VariantId) -> bool {
        self.position(variant_id).is_some()
    }

    /// The entry for `variant_id`, if any.
    #[must_use]
    pub fn get(&self, variant_id: &VariantId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| &item.variant_id == variant_id)
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the wishlist has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, WishlistItem> {
        self.items.iter()
    }

    /// Variant IDs in insertion order.
    pub fn variant_ids(&self) -> impl Iterator<Item = &VariantId> {
        self.items.iter().map(|item| &item.variant_id)
    }

    fn position(&self, variant_id: &VariantId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.variant_id == variant_id)
    }
}

impl From<Vec<WishlistItem>> for Wishlist {
    fn from(items: Vec<WishlistItem>) -> Self {
        let mut deduped: Vec<WishlistItem> = Vec::with_capacity(items.len());
        for item in items {
            if !deduped.iter().any(|kept| kept.variant_id == item.variant_id) {
                deduped.push(item);
            }
        }
        Self {
            items: deduped,
            max_items: None,
        }
    }
}

impl Serialize for Wishlist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Wishlist {
    type Item = &'a WishlistItem;
    type IntoIter = std::slice::Iter<'a, WishlistItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
