//! CLI command implementations.

pub mod wishlist;
