//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Wishlist (JSON, session-backed)
//! GET  /wishlist               - Wishlist items, count and count label
//! GET  /wishlist/count         - Wishlist count badge
//! GET  /wishlist/contains      - ?variant_id= membership check
//! GET  /wishlist/item          - ?variant_id= single entry (404 if absent)
//! POST /wishlist/add           - Add item (201 added, 200 already present)
//! POST /wishlist/remove        - Remove item by variant
//! POST /wishlist/clear         - Remove every item
//! ```

pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/count", get(wishlist::count))
        .route("/contains", get(wishlist::contains))
        .route("/item", get(wishlist::item))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
}

/// Create the main routes router.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/wishlist", wishlist_routes())
}
