//! Wishlist commands.
//!
//! Operate on a wishlist persisted under a data directory, the same JSON blob
//! the storefront keeps per visitor.
//!
//! # Usage
//!
//! ```bash
//! cs-cli wishlist add --product-id gid://shopify/Product/1 \
//!     --variant-id gid://shopify/ProductVariant/11 \
//!     --title "English Willow Bat" --handle english-willow-bat \
//!     --amount 12999.00 --currency INR
//! cs-cli wishlist list
//! cs-cli wishlist remove gid://shopify/ProductVariant/11
//! ```
//!
//! # Environment Variables
//!
//! - `CRICKET_SPHERE_DATA_DIR` - Directory holding the wishlist file

use std::path::Path;
use std::str::FromStr;

use cricket_sphere_core::{
    AddOutcome, CurrencyCode, CurrencyCodeError, IdError, Money, ProductId, VariantId,
    WishlistError, WishlistImage, WishlistItem,
};
use cricket_sphere_storefront::wishlist::{FileStorage, StorageError, WishlistStore};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during wishlist commands.
#[derive(Debug, Error)]
pub enum WishlistCommandError {
    /// Product or variant ID is invalid.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// Currency code is invalid.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(#[from] CurrencyCodeError),

    /// Amount is not a decimal number.
    #[error("Invalid amount {0:?}: {1}")]
    InvalidAmount(String, rust_decimal::Error),

    /// The wishlist rejected the item.
    #[error(transparent)]
    Wishlist(#[from] WishlistError),

    /// The change could not be written to the data directory.
    #[error("Failed to save wishlist: {0}")]
    Storage(#[from] StorageError),

    /// JSON encoding failed.
    #[error("Failed to encode wishlist: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Fields of an item to add.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub product_id: String,
    pub variant_id: String,
    pub title: String,
    pub handle: String,
    pub amount: String,
    pub currency: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub unavailable: bool,
}

impl NewItem {
    /// Parse into a wishlist item.
    ///
    /// # Errors
    ///
    /// Returns an error if an ID, the amount or the currency is malformed.
    pub fn into_item(self) -> Result<WishlistItem, WishlistCommandError> {
        let amount = Decimal::from_str(&self.amount)
            .map_err(|e| WishlistCommandError::InvalidAmount(self.amount.clone(), e))?;

        Ok(WishlistItem {
            id: ProductId::parse(&self.product_id)?,
            variant_id: VariantId::parse(&self.variant_id)?,
            title: self.title,
            handle: self.handle,
            price: Money::new(amount, CurrencyCode::parse(&self.currency)?),
            image: self.image_url.map(|url| WishlistImage {
                url,
                alt_text: self.image_alt,
            }),
            available_for_sale: !self.unavailable,
        })
    }
}

/// Open the wishlist stored under `data_dir`.
#[must_use]
pub fn open(data_dir: &Path, max_items: Option<usize>) -> WishlistStore<FileStorage> {
    let mut store = WishlistStore::new(FileStorage::new(data_dir)).with_max_items(max_items);
    store.load();
    store
}

/// Fail if the last change did not reach disk.
fn ensure_saved(store: &mut WishlistStore<FileStorage>) -> Result<(), WishlistCommandError> {
    match store.take_save_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Render the wishlist, one numbered line per item.
#[must_use]
pub fn list(data_dir: &Path) -> String {
    let store = open(data_dir, None);
    if store.count() == 0 {
        return "Your wishlist is empty".to_string();
    }

    store
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let stock = if item.available_for_sale {
                ""
            } else {
                " [out of stock]"
            };
            format!(
                "{}. {} ({}) {}{}",
                index + 1,
                item.title,
                item.variant_id,
                item.price.display(),
                stock
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the wishlist as the persisted JSON array.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn export(data_dir: &Path) -> Result<String, WishlistCommandError> {
    let store = open(data_dir, None);
    Ok(serde_json::to_string_pretty(store.items())?)
}

/// Number of items on the wishlist.
#[must_use]
pub fn count(data_dir: &Path) -> usize {
    open(data_dir, None).count()
}

/// Whether `variant_id` is on the wishlist.
///
/// # Errors
///
/// Returns an error if the variant ID is malformed.
pub fn contains(data_dir: &Path, variant_id: &str) -> Result<bool, WishlistCommandError> {
    let variant_id = VariantId::parse(variant_id)?;
    Ok(open(data_dir, None).contains(&variant_id))
}

/// Add an item to the wishlist.
///
/// # Errors
///
/// Returns an error if the item is malformed, invalid, or the wishlist is
/// full, or if the new entry could not be saved.
pub fn add(
    data_dir: &Path,
    item: NewItem,
    max_items: Option<usize>,
) -> Result<AddOutcome, WishlistCommandError> {
    let item = item.into_item()?;
    let variant_id = item.variant_id.clone();
    let mut store = open(data_dir, max_items);
    let outcome = store.add(item)?;
    if outcome.is_added() {
        ensure_saved(&mut store)?;
    }

    match outcome {
        AddOutcome::Added => tracing::info!(%variant_id, "Added to wishlist"),
        AddOutcome::AlreadyPresent => {
            tracing::info!(%variant_id, "Already on wishlist, keeping existing entry");
        }
    }
    Ok(outcome)
}

/// Remove an item from the wishlist. Returns whether it was present.
///
/// # Errors
///
/// Returns an error if the variant ID is malformed or the removal could not
/// be saved.
pub fn remove(data_dir: &Path, variant_id: &str) -> Result<bool, WishlistCommandError> {
    let variant_id = VariantId::parse(variant_id)?;
    let mut store = open(data_dir, None);
    let removed = store.remove(&variant_id).is_some();
    if removed {
        ensure_saved(&mut store)?;
        tracing::info!(%variant_id, "Removed from wishlist");
    } else {
        tracing::info!(%variant_id, "Not on wishlist");
    }
    Ok(removed)
}

/// Remove every item. Returns how many were removed.
///
/// # Errors
///
/// Returns an error if the emptied wishlist could not be saved.
pub fn clear(data_dir: &Path) -> Result<usize, WishlistCommandError> {
    let mut store = open(data_dir, None);
    let removed = store.clear();
    ensure_saved(&mut store)?;
    tracing::info!(removed, "Cleared wishlist");
    Ok(removed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_item(variant: &str, title: &str) -> NewItem {
        NewItem {
            product_id: "gid://shopify/Product/1".to_string(),
            variant_id: variant.to_string(),
            title: title.to_string(),
            handle: "english-willow-bat".to_string(),
            amount: "12999".to_string(),
            currency: "INR".to_string(),
            image_url: None,
            image_alt: None,
            unavailable: false,
        }
    }

    #[test]
    fn test_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(list(dir.path()), "Your wishlist is empty");
        assert_eq!(count(dir.path()), 0);
    }

    #[test]
    fn test_add_list_remove() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            add(dir.path(), new_item("v1", "Bat"), None).unwrap(),
            AddOutcome::Added
        );
        let mut gloves = new_item("v2", "Gloves");
        gloves.unavailable = true;
        add(dir.path(), gloves, None).unwrap();

        assert_eq!(
            list(dir.path()),
            "1. Bat (v1) INR 12999.00\n2. Gloves (v2) INR 12999.00 [out of stock]"
        );
        assert!(contains(dir.path(), "v1").unwrap());

        assert!(remove(dir.path(), "v1").unwrap());
        assert!(!remove(dir.path(), "v1").unwrap());
        assert_eq!(count(dir.path()), 1);
        assert!(!contains(dir.path(), "v1").unwrap());
    }

    #[test]
    fn test_duplicate_add_keeps_first() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), new_item("v1", "Bat"), None).unwrap();
        assert_eq!(
            add(dir.path(), new_item("v1", "Other"), None).unwrap(),
            AddOutcome::AlreadyPresent
        );
        assert!(list(dir.path()).contains("Bat"));
        assert!(!list(dir.path()).contains("Other"));
    }

    #[test]
    fn test_max_items() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), new_item("v1", "Bat"), Some(1)).unwrap();
        let err = add(dir.path(), new_item("v2", "Ball"), Some(1)).unwrap_err();
        assert!(matches!(
            err,
            WishlistCommandError::Wishlist(WishlistError::Full { max: 1 })
        ));
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), new_item("v1", "Bat"), None).unwrap();
        add(dir.path(), new_item("v2", "Ball"), None).unwrap();
        assert_eq!(clear(dir.path()).unwrap(), 2);
        assert_eq!(count(dir.path()), 0);
        assert_eq!(export(dir.path()).unwrap(), "[]");
    }

    #[test]
    fn test_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut item = new_item("v1", "Bat");
        item.amount = "twelve".to_string();
        assert!(matches!(
            add(dir.path(), item, None),
            Err(WishlistCommandError::InvalidAmount(_, _))
        ));

        let mut item = new_item("v1", "Bat");
        item.currency = "rupees".to_string();
        assert!(matches!(
            add(dir.path(), item, None),
            Err(WishlistCommandError::InvalidCurrency(_))
        ));

        assert!(matches!(
            contains(dir.path(), ""),
            Err(WishlistCommandError::InvalidId(_))
        ));
    }

    #[test]
    fn test_unwritable_data_dir_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = add(file.path(), new_item("v1", "Bat"), None).unwrap_err();
        assert!(matches!(err, WishlistCommandError::Storage(_)));
        assert!(matches!(
            clear(file.path()),
            Err(WishlistCommandError::Storage(_))
        ));
        assert_eq!(count(file.path()), 0);
    }

    #[test]
    fn test_already_present_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), new_item("v1", "Bat"), None).unwrap();
        let path = dir.path().join("cricket-sphere-wishlist.json");
        let before = std::fs::read_to_string(&path).unwrap();

        add(dir.path(), new_item("v1", "Other"), None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_unreadable_entry_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), new_item("v1", "Bat"), None).unwrap();
        add(dir.path(), new_item("v2", "Ball"), None).unwrap();

        let path = dir.path().join("cricket-sphere-wishlist.json");
        let raw = std::fs::read_to_string(&path).unwrap();
        let mut entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
        entries[1]["price"]["currencyCode"] = serde_json::json!("usd");
        std::fs::write(&path, entries.to_string()).unwrap();

        assert_eq!(count(dir.path()), 1);
        assert!(contains(dir.path(), "v1").unwrap());
        assert!(!contains(dir.path(), "v2").unwrap());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cricket-sphere-wishlist.json"), "oops").unwrap();
        assert_eq!(count(dir.path()), 0);
    }
}
