//! Authentication route handlers.
//!
//! Password login backed by the `users` table. The logged-in user lives in
//! the server-side session; the cookie only carries the signed session id.

use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, ResultExt, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::admin::products::SuccessBody;
use crate::services::AuthService;
use crate::state::AppState;
use crate::validation::parse_json;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying the session user.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: CurrentUser,
}

/// Log in with email and password.
///
/// POST /_api/auth/login_with_password
#[instrument(skip(state, session, body))]
pub async fn login_with_password(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<Json<UserBody>> {
    let request = parse_json::<LoginRequest>(&body).context("Failed to log in")?;

    let user = AuthService::new(state.pool())
        .login_with_password(&request.email, &request.password)
        .await
        .inspect_err(|e| tracing::info!(error = %e, "Password login failed"))?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(UserBody { user: current }))
}

/// End the session.
///
/// POST /_api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<SuccessBody>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();

    Ok(Json(SuccessBody { success: true }))
}

/// Return the logged-in user.
///
/// GET /_api/auth/session
pub async fn current_session(RequireAuth(user): RequireAuth) -> Json<UserBody> {
    Json(UserBody { user })
}
