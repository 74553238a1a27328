//! Integration tests for Cricket Sphere.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cricket-sphere-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_wishlist` - Wishlist HTTP API driven through the router
//!
//! The helpers here drive the storefront router in-process with
//! `tower::ServiceExt::oneshot`, carrying the session cookie between requests
//! like a browser would.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use cricket_sphere_storefront::config::StorefrontConfig;
use cricket_sphere_storefront::state::AppState;
use tower::ServiceExt;

/// Response captured by [`TestClient`].
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// In-process client with a cookie jar of one session cookie.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client for a storefront with the given wishlist size limit.
    #[must_use]
    pub fn new(wishlist_max_items: Option<usize>) -> Self {
        Self {
            app: cricket_sphere_storefront::app(AppState::new(test_config(wishlist_max_items))),
            cookie: None,
        }
    }

    /// A second visitor on the same server (no session cookie).
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the response is unreadable.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a POST request with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the response is unreadable.
    pub async fn post(&mut self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    #[allow(clippy::unwrap_used)]
    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<&serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()));

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Storefront configuration for tests.
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn test_config(wishlist_max_items: Option<usize>) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        wishlist_max_items,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// JSON body of a wishlist item.
#[must_use]
pub fn item_json(variant: &str, title: &str, available: bool) -> serde_json::Value {
    serde_json::json!({
        "id": "gid://shopify/Product/100",
        "variantId": variant,
        "title": title,
        "handle": "kookaburra-ghost-bat",
        "price": {"amount": "18999.00", "currencyCode": "INR"},
        "image": {"url": "https://cdn.example/bat.jpg", "altText": "Bat front"},
        "availableForSale": available
    })
}
