//! Cart line input handed to the add-to-cart collaborator.

use serde::Serialize;

use super::id::VariantId;

/// Errors that can occur when building a [`CartLineInput`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartLineError {
    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// A line to add to a Shopify cart (`CartLineInput` in the Storefront API).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    merchandise_id: VariantId,
    quantity: u32,
}

impl CartLineInput {
    /// Create a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CartLineError::ZeroQuantity`] if `quantity` is zero.
    pub fn new(merchandise_id: VariantId, quantity: u32) -> Result<Self, CartLineError> {
        if quantity == 0 {
            return Err(CartLineError::ZeroQuantity);
        }
        Ok(Self {
            merchandise_id,
            quantity,
        })
    }

    /// A single unit of the given variant.
    #[must_use]
    pub const fn single(merchandise_id: VariantId) -> Self {
        Self {
            merchandise_id,
            quantity: 1,
        }
    }

    /// The variant to add.
    #[must_use]
    pub const fn merchandise_id(&self) -> &VariantId {
        &self.merchandise_id
    }

    /// Number of units, never zero.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantity_rejected() {
        let variant = VariantId::parse("gid://shopify/ProductVariant/1").unwrap();
        assert_eq!(
            CartLineInput::new(variant, 0),
            Err(CartLineError::ZeroQuantity)
        );
    }

    #[test]
    fn test_wire_format() {
        let variant = VariantId::parse("gid://shopify/ProductVariant/1").unwrap();
        let line = CartLineInput::new(variant, 2).unwrap();
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            serde_json::json!({
                "merchandiseId": "gid://shopify/ProductVariant/1",
                "quantity": 2
            })
        );
    }
}
