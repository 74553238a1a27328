//! A single wishlist entry.

use serde::{Deserialize, Serialize};

use super::list::WishlistError;
use crate::types::{CartLineInput, Money, ProductId, VariantId};

/// Product image captured when the item was wishlisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistImage {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// One product variant on a wishlist.
///
/// The JSON shape is shared with the persisted wishlist blob, so field names
/// and optionality must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Product the variant belongs to. Several entries may share it.
    pub id: ProductId,
    /// The purchasable variant; the wishlist's key.
    pub variant_id: VariantId,
    /// Display name.
    pub title: String,
    /// URL slug of the product page.
    pub handle: String,
    /// Price at the time the item was added.
    pub price: Money,
    /// Product image, if the variant had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<WishlistImage>,
    /// Purchasability when the item was added. Not re-validated.
    pub available_for_sale: bool,
}

impl WishlistItem {
    /// Check the fields the ID and money types cannot enforce on their own.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::InvalidItem`] if the title or handle is blank,
    /// or the price is negative.
    pub fn validate(&self) -> Result<(), WishlistError> {
        if self.title.trim().is_empty() {
            return Err(WishlistError::InvalidItem("title cannot be empty"));
        }
        if self.handle.trim().is_empty() {
            return Err(WishlistError::InvalidItem("handle cannot be empty"));
        }
        if self.price.is_negative() {
            return Err(WishlistError::InvalidItem("price cannot be negative"));
        }
        Ok(())
    }

    /// Relative URL of the product page.
    #[must_use]
    pub fn product_path(&self) -> String {
        format!("/products/{}", self.handle)
    }

    /// Image alt text, falling back to the product title.
    #[must_use]
    pub fn image_alt(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|image| image.alt_text.as_deref().unwrap_or(&self.title))
    }

    /// Single-unit cart line for this variant, or `None` when it was not
    /// available for sale.
    #[must_use]
    pub fn cart_line(&self) -> Option<CartLineInput> {
        self.available_for_sale
            .then(|| CartLineInput::single(self.variant_id.clone()))
    }
}
