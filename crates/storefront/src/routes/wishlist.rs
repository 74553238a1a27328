//! Wishlist route handlers.
//!
//! Each request opens a [`WishlistStore`] over the visitor's session slot,
//! applies one operation, and flushes the slot back to the session. Mutations
//! respond with an `HX-Trigger: wishlist-updated` header when the list
//! changed so other page fragments can refresh.
//!
//! Malformed bodies and queries are answered with `400 Bad Request` through
//! [`AppError`].

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use cricket_sphere_core::{
    AddOutcome, CartLineInput, Money, ProductId, VariantId, Wishlist, WishlistItem,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;
use crate::wishlist::{SessionSlot, WISHLIST_STORAGE_KEY, WishlistStore};

/// Event name sent to HTMX listeners after the wishlist changes.
const WISHLIST_UPDATED_TRIGGER: &str = "wishlist-updated";

// =============================================================================
// Views
// =============================================================================

/// Image display data.
#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// One wishlist row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemView {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub title: String,
    pub handle: String,
    /// Product page URL.
    pub url: String,
    pub price: Money,
    /// Price formatted as `"{currency} {amount}"`.
    pub formatted_price: String,
    pub image: Option<ImageView>,
    pub available_for_sale: bool,
    /// Cart line for the add-to-cart button; absent when out of stock.
    pub cart_line: Option<CartLineInput>,
}

impl From<&WishlistItem> for WishlistItemView {
    fn from(item: &WishlistItem) -> Self {
        Self {
            variant_id: item.variant_id.clone(),
            product_id: item.id.clone(),
            title: item.title.clone(),
            handle: item.handle.clone(),
            url: item.product_path(),
            price: item.price.clone(),
            formatted_price: item.price.display(),
            image: item.image.as_ref().map(|image| ImageView {
                url: image.url.clone(),
                alt: item.image_alt().unwrap_or(&item.title).to_string(),
            }),
            available_for_sale: item.available_for_sale,
            cart_line: item.cart_line(),
        }
    }
}

/// Wishlist page data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<WishlistItemView>,
    pub count: usize,
    /// `"1 item"` or `"{n} items"`.
    pub count_label: String,
}

impl From<&Wishlist> for WishlistView {
    fn from(list: &Wishlist) -> Self {
        Self {
            items: list.iter().map(WishlistItemView::from).collect(),
            count: list.len(),
            count_label: count_label(list.len()),
        }
    }
}

/// Format an item count for display.
#[must_use]
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

/// Wishlist count badge data.
#[derive(Debug, Serialize)]
pub struct CountView {
    pub count: usize,
}

/// Membership check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainsView {
    pub variant_id: VariantId,
    pub in_wishlist: bool,
}

// =============================================================================
// Requests
// =============================================================================

/// Query identifying one variant.
#[derive(Debug, Deserialize)]
pub struct VariantQuery {
    pub variant_id: VariantId,
}

/// Remove request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub variant_id: VariantId,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Open the visitor's wishlist from the session.
async fn open_store(state: &AppState, session: &Session) -> WishlistStore<SessionSlot> {
    let slot = SessionSlot::read(session, WISHLIST_STORAGE_KEY).await;
    let mut store = WishlistStore::new(slot).with_max_items(state.wishlist_max_items());
    store.load();
    store
}

/// Write any pending change back to the session.
async fn persist(store: WishlistStore<SessionSlot>, session: &Session) -> Result<()> {
    store.into_storage().flush(session).await?;
    Ok(())
}

fn updated(changed: bool, view: WishlistView) -> Response {
    if changed {
        (
            AppendHeaders([("HX-Trigger", WISHLIST_UPDATED_TRIGGER)]),
            Json(view),
        )
            .into_response()
    } else {
        Json(view).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the wishlist.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<WishlistView>> {
    let store = open_store(&state, &session).await;
    let view = WishlistView::from(store.items());
    persist(store, &session).await?;
    Ok(Json(view))
}

/// Wishlist count badge.
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CountView>> {
    let store = open_store(&state, &session).await;
    let count = store.count();
    persist(store, &session).await?;
    Ok(Json(CountView { count }))
}

/// Whether a variant is wishlisted (drives the wishlist toggle on product pages).
#[instrument(skip(state, session))]
pub async fn contains(
    State(state): State<AppState>,
    session: Session,
    query: std::result::Result<Query<VariantQuery>, QueryRejection>,
) -> Result<Json<ContainsView>> {
    let Query(query) = query?;
    let store = open_store(&state, &session).await;
    let in_wishlist = store.contains(&query.variant_id);
    persist(store, &session).await?;
    Ok(Json(ContainsView {
        variant_id: query.variant_id,
        in_wishlist,
    }))
}

/// Fetch a single wishlist entry.
#[instrument(skip(state, session))]
pub async fn item(
    State(state): State<AppState>,
    session: Session,
    query: std::result::Result<Query<VariantQuery>, QueryRejection>,
) -> Result<Json<WishlistItemView>> {
    let Query(query) = query?;
    let store = open_store(&state, &session).await;
    let view = store
        .items()
        .get(&query.variant_id)
        .map(WishlistItemView::from);
    persist(store, &session).await?;
    view.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("wishlist item {}", query.variant_id)))
}

/// Add an item to the wishlist.
///
/// Responds `201 Created` when the item was added and `200 OK` when the
/// variant was already wishlisted (the existing entry is kept).
#[instrument(skip(state, session, payload))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<WishlistItem>, JsonRejection>,
) -> Result<Response> {
    let Json(item) = payload.inspect_err(|e| {
        tracing::info!(error = %e, "Rejected wishlist payload");
    })?;
    let mut store = open_store(&state, &session).await;
    let variant_id = item.variant_id.to_string();

    let outcome = match store.add(item) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!(error = %e, %variant_id, "Rejected wishlist item");
            return Err(e.into());
        }
    };

    let view = WishlistView::from(store.items());
    persist(store, &session).await?;

    let response = match outcome {
        AddOutcome::Added => {
            add_breadcrumb(
                "wishlist",
                "Added to wishlist",
                Some(&[("variant_id", variant_id.as_str())]),
            );
            (StatusCode::CREATED, updated(true, view)).into_response()
        }
        AddOutcome::AlreadyPresent => updated(false, view),
    };
    Ok(response)
}

/// Remove an item from the wishlist. Removing an absent variant is a no-op.
#[instrument(skip(state, session, payload))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<RemoveRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    let mut store = open_store(&state, &session).await;
    let changed = store.remove(&request.variant_id).is_some();
    let view = WishlistView::from(store.items());
    persist(store, &session).await?;
    Ok(updated(changed, view))
}

/// Remove every item from the wishlist.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut store = open_store(&state, &session).await;
    let removed = store.clear();
    tracing::debug!(removed, "Cleared wishlist");
    let view = WishlistView::from(store.items());
    persist(store, &session).await?;
    Ok(updated(true, view))
}
