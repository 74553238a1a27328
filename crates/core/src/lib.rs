//! Cricket Sphere Core - Shared types library.
//!
//! This crate provides the types used across all Cricket Sphere components:
//! - `storefront` - Public-facing wishlist API and the persistent wishlist store
//! - `cli` - Command-line tools for inspecting and editing a wishlist on disk
//!
//! # Architecture
//!
//! The core crate contains only types and pure collection logic - no I/O, no
//! storage access, no HTTP clients. Persistence lives in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for Shopify IDs, money and cart line inputs
//! - [`wishlist`] - Wishlist items and the deduplicated, ordered wishlist aggregate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod wishlist;

pub use types::*;
pub use wishlist::{AddOutcome, Wishlist, WishlistError, WishlistImage, WishlistItem};
