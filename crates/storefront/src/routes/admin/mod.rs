//! Admin API. Every handler takes `RequireAdmin`.

pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin routes router (mounted at `/_api/admin`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(products::create))
        .route("/product/update", post(products::update))
        .route("/product/delete", post(products::delete))
        .route("/settings", get(settings::index))
        .route("/settings/update", post(settings::update))
}
