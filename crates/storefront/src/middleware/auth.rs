//! Authentication extractors.
//!
//! Extractors run before the body is read, so an anonymous or non-admin
//! caller is turned away without the request payload being parsed.
//!
//! The session only carries the user's identity. Role and profile are
//! reloaded from the `users` table on every request, so a demoted or
//! deleted account loses access immediately.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::error::{AppError, ResultExt};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Message for requests without a logged-in user.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Message for logged-in users without the admin role.
pub const ADMINS_ONLY: &str = "Forbidden: Admins only";

const LOAD_USER_CONTEXT: &str = "Failed to load session user";

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.display_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a logged-in user with the admin role.
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when an extractor rejects the request.
#[derive(Debug)]
pub enum AuthRejection {
    /// No user in the session.
    NotAuthenticated,
    /// User present but not an admin.
    Forbidden,
}

impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::NotAuthenticated => Self::Unauthorized(NOT_AUTHENTICATED.to_owned()),
            AuthRejection::Forbidden => Self::Forbidden(ADMINS_ONLY.to_owned()),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// The admin role check.
///
/// # Errors
///
/// Returns `AuthRejection::NotAuthenticated` when there is no user and
/// `AuthRejection::Forbidden` when the user is not an admin.
pub fn authorize_admin(user: Option<CurrentUser>) -> Result<CurrentUser, AuthRejection> {
    let user = user.ok_or(AuthRejection::NotAuthenticated)?;
    if !user.role.is_admin() {
        return Err(AuthRejection::Forbidden);
    }
    Ok(user)
}

async fn session_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Resolve the session's user against the database.
///
/// `None` when there is no session user or the account no longer exists.
async fn current_user(parts: &Parts, state: &AppState) -> Result<Option<CurrentUser>, AppError> {
    let Some(session_user) = session_user(parts).await else {
        return Ok(None);
    };

    let stored = UserRepository::new(state.pool())
        .get_by_id(session_user.id)
        .await
        .context(LOAD_USER_CONTEXT)?;

    if stored.is_none() {
        tracing::info!(user_id = %session_user.id, "Session refers to a deleted user");
    }

    Ok(stored.as_ref().map(CurrentUser::from))
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = current_user(parts, state)
            .await?
            .ok_or(AuthRejection::NotAuthenticated)?;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize_admin(current_user(parts, state).await?)?;

        sentry::configure_scope(|scope| {
            scope.set_tag("admin_id", user.id);
        });

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to end the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use champ_core::{Email, UserId, UserRole};

    use super::*;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: UserId::new(5),
            email: Email::parse("staff@champfootwear.in").unwrap(),
            display_name: "Staff".to_owned(),
            role,
        }
    }

    #[test]
    fn test_admin_passes() {
        let admin = authorize_admin(Some(user(UserRole::Admin))).unwrap();
        assert_eq!(admin.id, UserId::new(5));
    }

    #[test]
    fn test_regular_user_is_forbidden() {
        let rejection = authorize_admin(Some(user(UserRole::User))).unwrap_err();
        assert!(matches!(rejection, AuthRejection::Forbidden));
        assert_eq!(rejection.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_user_is_unauthenticated() {
        let rejection = authorize_admin(None).unwrap_err();
        assert!(matches!(rejection, AuthRejection::NotAuthenticated));
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
