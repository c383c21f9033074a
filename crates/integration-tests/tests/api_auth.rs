//! Session and admin role rejections.
//!
//! None of these requests reach the database: requests without a session
//! cookie never load a session record.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use champ_integration_tests::{get, lazy_pool, post_json, post_raw, send, test_app};

// ============================================================================
// Admin Endpoints
// ============================================================================

#[tokio::test]
async fn test_admin_mutations_require_session() {
    let product = json!({
        "name": "Air Runner",
        "brand": "Nike",
        "price": 4999,
        "quality": "Premium",
        "mainImageUrl": "https://cdn.example.com/a.jpg"
    });

    let cases = [
        ("/_api/admin/products", product),
        ("/_api/admin/product/update", json!({ "id": 1, "name": "New Name" })),
        ("/_api/admin/product/delete", json!({ "id": 1 })),
        ("/_api/admin/settings/update", json!({ "settings": { "whatsappNumber": "1" } })),
    ];

    for (uri, body) in cases {
        let resp = send(test_app(lazy_pool()), post_json(uri, &body, None)).await;

        assert_eq!(resp.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(resp.json(), json!({ "error": "Not authenticated" }), "{uri}");
    }
}

#[tokio::test]
async fn test_admin_settings_read_requires_session() {
    let resp = send(test_app(lazy_pool()), get("/_api/admin/settings", None)).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json()["error"], "Not authenticated");
}

#[tokio::test]
async fn test_role_check_runs_before_body_validation() {
    // An invalid body still gets 401, not 400
    let resp = send(
        test_app(lazy_pool()),
        post_raw("/_api/admin/product/delete", "{not json"),
    )
    .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_cookie_is_not_a_session() {
    let resp = send(
        test_app(lazy_pool()),
        get(
            "/_api/admin/settings",
            Some("champ_session=forged-session-id-without-signature"),
        ),
    )
    .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Auth Endpoints
// ============================================================================

#[tokio::test]
async fn test_session_without_login_is_unauthorized() {
    let resp = send(test_app(lazy_pool()), get("/_api/auth/session", None)).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json()["error"], "Not authenticated");
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let resp = send(
        test_app(lazy_pool()),
        post_raw("/_api/auth/login_with_password", "{\"email\": 1}"),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let body = resp.json();
    assert_eq!(body["error"], "Failed to log in");
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body")
    );
}

#[tokio::test]
async fn test_login_with_invalid_email_is_generic_failure() {
    let resp = send(
        test_app(lazy_pool()),
        post_json(
            "/_api/auth/login_with_password",
            &json!({ "email": "not-an-email", "password": "whatever-password" }),
            None,
        ),
    )
    .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json(), json!({ "error": "Invalid email or password" }));
    assert!(resp.session_cookie().is_none());
}
