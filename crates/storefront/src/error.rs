//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as
//! `{"error": ..., "details"?: ...}`. Server-side failures are captured to
//! Sentry before responding and never leak internal details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::validation::ValidationError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request was rejected by validation.
    #[error("{context}: {source}")]
    Validation {
        context: &'static str,
        #[source]
        source: ValidationError,
    },

    /// A repository call failed.
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found. The message is shown to the client.
    #[error("{0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// User is authenticated but lacks the required role.
    #[error("{0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Repository { source, .. } => !matches!(source, RepositoryError::NotFound),
            Self::Auth(err) => matches!(err, AuthError::Store(_) | AuthError::Hashing),
            Self::Internal(_) => true,
            _ => false,
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Repository { source, .. } => match source {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Store(_) | AuthError::Hashing => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            Self::Validation { context, source } => ((*context).to_owned(), Some(source.to_string())),
            // Don't expose internal error details to clients
            Self::Repository { context, .. } => ((*context).to_owned(), None),
            Self::Auth(err) => {
                let message = match err {
                    AuthError::InvalidCredentials => "Invalid email or password".to_owned(),
                    AuthError::EmailTaken => {
                        "An account with this email already exists".to_owned()
                    }
                    AuthError::WeakPassword(msg) => msg.clone(),
                    AuthError::Store(_) | AuthError::Hashing => {
                        "Authentication error".to_owned()
                    }
                };
                (message, None)
            }
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::Forbidden(msg) => {
                (msg.clone(), None)
            }
            Self::Internal(_) => ("Internal server error".to_owned(), None),
        };
        ErrorBody { error, details }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach an endpoint context ("Failed to fetch products") to a lower-level
/// error.
pub trait ResultExt<T> {
    /// # Errors
    ///
    /// Wraps the error in the matching `AppError` variant.
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, ValidationError> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Validation { context, source })
    }
}

impl<T> ResultExt<T> for std::result::Result<T, RepositoryError> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Repository { context, source })
    }
}

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for admin actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_has_details() {
        let err: Result<()> = Err(ValidationError::field("name", "Name must be at least 3 characters"))
            .context("Failed to create product");
        let (status, body) = render(err.unwrap_err()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Failed to create product");
        assert_eq!(body["details"], "name: Name must be at least 3 characters");
    }

    #[tokio::test]
    async fn test_repository_error_hides_details() {
        let err: Result<()> = Err(RepositoryError::DataCorruption(
            "price is null for product ID 7".to_owned(),
        ))
        .context("Failed to fetch products");
        let (status, body) = render(err.unwrap_err()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch products");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_role_errors() {
        let (status, body) = render(AppError::Forbidden("Forbidden: Admins only".to_owned())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden: Admins only");

        let (status, body) = render(AppError::Unauthorized("Not authenticated".to_owned())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_invalid_credentials_message() {
        let (status, body) = render(AppError::Auth(AuthError::InvalidCredentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_auth_error_bodies() {
        let reason = "Password must be at least 12 characters".to_owned();
        let (status, body) = render(AppError::Auth(AuthError::WeakPassword(reason))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must be at least 12 characters");

        let (status, body) = render(AppError::Auth(AuthError::Hashing)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Authentication error");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("Product not found".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Repository {
                context: "Failed to update product",
                source: RepositoryError::NotFound,
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::EmailTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
