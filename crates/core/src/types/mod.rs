//! Core types for Cricket Sphere.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{CartLineInput, CartLineError};
pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Money};
