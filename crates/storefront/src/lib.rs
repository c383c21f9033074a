//! CHAMP storefront library.
//!
//! JSON API for the footwear catalog and its admin panel. The binary in
//! `main.rs` adds process setup (config, tracing, Sentry, listener) around
//! [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

use axum::Router;
use axum::middleware::from_fn;

use middleware::session::SessionKeyError;
use routes::RateLimiting;
use state::AppState;

/// Build the application router with its session and header middleware.
///
/// # Errors
///
/// Returns `SessionKeyError` if the session secret cannot be used as a
/// signing key.
pub fn app(state: AppState, rate_limiting: RateLimiting) -> Result<Router, SessionKeyError> {
    let session_layer = middleware::create_session_layer(state.pool(), state.config())?;

    Ok(routes::routes(rate_limiting)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .with_state(state))
}
