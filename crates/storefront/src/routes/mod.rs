//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness
//! GET  /health/ready                   - Readiness (database)
//!
//! # Catalog
//! GET  /_api/products                  - Filtered product listing
//! GET  /_api/product?id=N              - Product detail + WhatsApp link
//! GET  /_api/settings                  - Public settings
//!
//! # Auth
//! POST /_api/auth/login_with_password  - Password login (strict rate limit)
//! POST /_api/auth/logout               - End session
//! GET  /_api/auth/session              - Current user
//!
//! # Admin (requires admin role)
//! POST /_api/admin/products            - Create product
//! POST /_api/admin/product/update      - Partial update
//! POST /_api/admin/product/delete      - Delete product
//! GET  /_api/admin/settings            - All settings
//! POST /_api/admin/settings/update     - Upsert settings
//! ```

pub mod admin;
pub mod auth;
pub mod health;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Whether route groups get their `governor` limiters.
///
/// Limiters key on the client address, so in-process tests without a peer
/// address run with them off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimiting {
    Enabled,
    Disabled,
}

/// Create the auth routes router.
pub fn auth_routes(rate_limiting: RateLimiting) -> Router<AppState> {
    let mut login = Router::new().route("/login_with_password", post(auth::login_with_password));
    if rate_limiting == RateLimiting::Enabled {
        login = login.layer(auth_rate_limiter());
    }

    Router::new()
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::current_session))
        .merge(login)
}

/// Create the catalog and admin API router.
pub fn api_routes(rate_limiting: RateLimiting) -> Router<AppState> {
    let router = Router::new()
        .route("/products", get(products::index))
        .route("/product", get(products::show))
        .route("/settings", get(settings::public))
        .nest("/admin", admin::routes());

    match rate_limiting {
        RateLimiting::Enabled => router.layer(api_rate_limiter()),
        RateLimiting::Disabled => router,
    }
}

/// Create all routes for the storefront.
pub fn routes(rate_limiting: RateLimiting) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/_api/auth", auth_routes(rate_limiting))
        .nest("/_api", api_routes(rate_limiting))
}
