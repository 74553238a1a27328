//! Wishlist domain types.
//!
//! A wishlist is an ordered collection of product variants a visitor has
//! marked as desired. Entries are keyed by [`VariantId`](crate::VariantId):
//! no two entries share a variant, and insertion order is preserved across
//! removals.

mod item;
mod list;

pub use item::{WishlistImage, WishlistItem};
pub use list::{AddOutcome, Wishlist, WishlistError};
