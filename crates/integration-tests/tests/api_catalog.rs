//! Catalog validation, health and response headers.
//!
//! Every request here fails (or succeeds) before touching the database.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use champ_integration_tests::{get, lazy_pool, send, test_app};

// ============================================================================
// Products Listing
// ============================================================================

#[tokio::test]
async fn test_unknown_price_range_is_rejected() {
    let resp = send(
        test_app(lazy_pool()),
        get("/_api/products?priceRange=cheap", None),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let body = resp.json();
    assert_eq!(body["error"], "Failed to fetch products");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("priceRange"), "{details}");
    assert!(details.contains("cheap"), "{details}");
}

#[tokio::test]
async fn test_each_filter_checks_its_vocabulary() {
    for query in ["brand=Acme", "size=99", "color=Teal", "quality=Fake"] {
        let resp = send(
            test_app(lazy_pool()),
            get(&format!("/_api/products?{query}"), None),
        )
        .await;

        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(resp.json()["error"], "Failed to fetch products", "{query}");
    }
}

// ============================================================================
// Product Detail
// ============================================================================

#[tokio::test]
async fn test_product_id_must_be_positive_integer() {
    for query in ["", "?id=", "?id=0", "?id=-4", "?id=abc", "?id=1.5"] {
        let resp = send(
            test_app(lazy_pool()),
            get(&format!("/_api/product{query}"), None),
        )
        .await;

        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(resp.json()["error"], "Failed to fetch product", "{query}");
    }
}

// ============================================================================
// Health and Headers
// ============================================================================

#[tokio::test]
async fn test_health() {
    let resp = send(test_app(lazy_pool()), get("/health", None)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "ok");
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    for uri in ["/health", "/_api/auth/session", "/no/such/route"] {
        let resp = send(test_app(lazy_pool()), get(uri, None)).await;

        assert_eq!(resp.headers["x-frame-options"], "DENY", "{uri}");
        assert_eq!(resp.headers["x-content-type-options"], "nosniff", "{uri}");
        assert!(resp.headers.contains_key("content-security-policy"), "{uri}");
        assert!(resp.headers.contains_key("x-request-id"), "{uri}");
    }
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-abc-123")
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = send(test_app(lazy_pool()), request).await;

    assert_eq!(resp.headers["x-request-id"], "trace-abc-123");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let resp = send(test_app(lazy_pool()), get("/_api/nope", None)).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let resp = send(test_app(lazy_pool()), get("/_api/admin/product/delete", None)).await;

    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}
