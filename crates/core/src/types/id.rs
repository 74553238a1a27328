//! Newtype IDs for Shopify global identifiers.
//!
//! Shopify addresses every object by an opaque global ID string such as
//! `gid://shopify/ProductVariant/42`. Use the `define_gid!` macro to create
//! type-safe wrappers that prevent accidentally mixing IDs from different
//! entity types.

/// Errors that can occur when parsing a Shopify ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty or only whitespace.
    #[error("id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Maximum length accepted for a Shopify ID.
pub const MAX_ID_LENGTH: usize = 255;

/// Validate a raw ID string.
///
/// # Errors
///
/// Returns an error if the input is blank or longer than [`MAX_ID_LENGTH`].
pub fn validate_id(s: &str) -> Result<(), IdError> {
    if s.trim().is_empty() {
        return Err(IdError::Empty);
    }
    if s.len() > MAX_ID_LENGTH {
        return Err(IdError::TooLong { max: MAX_ID_LENGTH });
    }
    Ok(())
}

/// Macro to define a type-safe Shopify ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string, `Deserialize` with validation
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `parse()`, `as_str()`, `into_inner()`
/// - `FromStr`, `TryFrom<String>`, `Display` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use cricket_sphere_core::define_gid;
/// define_gid!(CollectionId);
/// define_gid!(OrderId);
///
/// let collection = CollectionId::parse("gid://shopify/Collection/1").unwrap();
/// let order = OrderId::parse("gid://shopify/Order/1").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: CollectionId = order;
/// # let _ = (collection, order);
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an ID from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is blank or too long.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                $crate::types::id::validate_id(s)?;
                Ok(Self(s.to_owned()))
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::types::id::IdError;

            fn try_from(s: String) -> ::core::result::Result<Self, Self::Error> {
                $crate::types::id::validate_id(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(ProductId);
define_gid!(VariantId);
