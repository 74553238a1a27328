//! Integration tests for the storefront wishlist API.
//!
//! Each test drives the full router (session layer included) in-process, so
//! the wishlist round-trips through the session exactly as it does for a
//! browser.

use axum::http::StatusCode;
use cricket_sphere_integration_tests::{TestClient, item_json};
use serde_json::json;

const BAT: &str = "gid://shopify/ProductVariant/1";
const BALL: &str = "gid://shopify/ProductVariant/2";
const PADS: &str = "gid://shopify/ProductVariant/3";

fn variant_ids(body: &serde_json::Value) -> Vec<String> {
    body["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["variantId"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new(None);
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("ok"));
    assert!(response.headers.contains_key("x-request-id"));
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_empty_wishlist() {
    let mut client = TestClient::new(None);
    let response = client.get("/wishlist").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 0);
    assert_eq!(response.body["countLabel"], "0 items");
    assert!(variant_ids(&response.body).is_empty());
}

#[tokio::test]
async fn test_item_lookup() {
    let mut client = TestClient::new(None);
    client.post("/wishlist/add", &item_json(BAT, "Ghost Bat", true)).await;

    let response = client
        .get(&format!("/wishlist/item?variant_id={BAT}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["url"], "/products/kookaburra-ghost-bat");
    assert_eq!(response.body["formattedPrice"], "INR 18999.00");
    assert_eq!(response.body["image"]["alt"], "Bat front");

    let response = client
        .get(&format!("/wishlist/item?variant_id={BALL}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_add_then_contains() {
    let mut client = TestClient::new(None);

    let response = client
        .post("/wishlist/add", &item_json(BAT, "Ghost Bat", true))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.headers["hx-trigger"], "wishlist-updated");
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["countLabel"], "1 item");

    let response = client
        .get(&format!("/wishlist/contains?variant_id={BAT}"))
        .await;
    assert_eq!(response.body["inWishlist"], true);

    let response = client
        .get(&format!("/wishlist/contains?variant_id={BALL}"))
        .await;
    assert_eq!(response.body["inWishlist"], false);

    let response = client.get("/wishlist/count").await;
    assert_eq!(response.body["count"], 1);
}

#[tokio::test]
async fn test_duplicate_add_keeps_original() {
    let mut client = TestClient::new(None);
    client.post("/wishlist/add", &item_json(BAT, "Ghost Bat", true)).await;

    let response = client
        .post("/wishlist/add", &item_json(BAT, "Renamed Bat", true))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.headers.contains_key("hx-trigger"));
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["items"][0]["title"], "Ghost Bat");
}

#[tokio::test]
async fn test_remove_preserves_order() {
    let mut client = TestClient::new(None);
    for (variant, title) in [(BAT, "Bat"), (BALL, "Ball"), (PADS, "Pads")] {
        client.post("/wishlist/add", &item_json(variant, title, true)).await;
    }

    let response = client
        .post("/wishlist/remove", &json!({"variantId": BALL}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(variant_ids(&response.body), vec![BAT, PADS]);

    // Removing again is a no-op.
    let response = client
        .post("/wishlist/remove", &json!({"variantId": BALL}))
        .await;
    assert!(!response.headers.contains_key("hx-trigger"));
    assert_eq!(variant_ids(&response.body), vec![BAT, PADS]);

    let response = client.get("/wishlist").await;
    assert_eq!(variant_ids(&response.body), vec![BAT, PADS]);
}

#[tokio::test]
async fn test_clear() {
    let mut client = TestClient::new(None);
    for (variant, title) in [(BAT, "Bat"), (BALL, "Ball"), (PADS, "Pads")] {
        client.post("/wishlist/add", &item_json(variant, title, true)).await;
    }

    let response = client.post("/wishlist/clear", &json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 0);

    let response = client.get("/wishlist/count").await;
    assert_eq!(response.body["count"], 0);
    let response = client
        .get(&format!("/wishlist/contains?variant_id={BAT}"))
        .await;
    assert_eq!(response.body["inWishlist"], false);
}

// =============================================================================
// Views
// =============================================================================

#[tokio::test]
async fn test_cart_line_only_for_available_items() {
    let mut client = TestClient::new(None);
    client.post("/wishlist/add", &item_json(BAT, "Bat", true)).await;
    client.post("/wishlist/add", &item_json(BALL, "Ball", false)).await;

    let response = client.get("/wishlist").await;
    let items = &response.body["items"];
    assert_eq!(items[0]["cartLine"], json!({"merchandiseId": BAT, "quantity": 1}));
    assert!(items[1]["cartLine"].is_null());
    assert_eq!(items[1]["availableForSale"], false);
    assert_eq!(response.body["countLabel"], "2 items");
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_invalid_item_rejected() {
    let mut client = TestClient::new(None);

    let mut item = item_json(BAT, "Bat", true);
    item["title"] = json!("   ");
    let response = client.post("/wishlist/add", &item).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.get("/wishlist/count").await;
    assert_eq!(response.body["count"], 0);
}

#[tokio::test]
async fn test_missing_variant_id_rejected() {
    let mut client = TestClient::new(None);
    let mut item = item_json(BAT, "Bat", true);
    if let Some(fields) = item.as_object_mut() {
        fields.remove("variantId");
    }

    let response = client.post("/wishlist/add", &item).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.get("/wishlist/count").await;
    assert_eq!(response.body["count"], 0);
}

#[tokio::test]
async fn test_empty_variant_id_rejected() {
    let mut client = TestClient::new(None);

    let response = client
        .post("/wishlist/add", &item_json("", "Bat", true))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client
        .post("/wishlist/remove", &json!({"variantId": ""}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_query_rejected() {
    let mut client = TestClient::new(None);

    let response = client.get("/wishlist/contains?variant_id=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.get("/wishlist/contains").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.get("/wishlist/item?variant_id=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let mut client = TestClient::new(None);

    let response = client
        .post("/wishlist/remove", &json!("not an object"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_wishlist_conflict() {
    let mut client = TestClient::new(Some(2));
    client.post("/wishlist/add", &item_json(BAT, "Bat", true)).await;
    client.post("/wishlist/add", &item_json(BALL, "Ball", true)).await;

    let response = client.post("/wishlist/add", &item_json(PADS, "Pads", true)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = client.get("/wishlist").await;
    assert_eq!(variant_ids(&response.body), vec![BAT, BALL]);
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_wishlists_are_per_visitor() {
    let mut alice = TestClient::new(None);
    alice.post("/wishlist/add", &item_json(BAT, "Bat", true)).await;

    let mut bob = alice.new_visitor();
    let response = bob.get("/wishlist").await;
    assert_eq!(response.body["count"], 0);

    let response = alice.get("/wishlist").await;
    assert_eq!(variant_ids(&response.body), vec![BAT]);
}
