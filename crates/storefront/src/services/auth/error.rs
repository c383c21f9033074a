//! Errors from password login and account creation.

use thiserror::Error;

use crate::db::RepositoryError;

/// Why a login or account creation failed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email/password pair does not match a stored account. Login does
    /// not say which half was wrong.
    #[error("email or password did not match")]
    InvalidCredentials,

    #[error("email is already registered")]
    EmailTaken,

    /// Password rejected before hashing; carries the user-facing reason.
    #[error("{0}")]
    WeakPassword(String),

    #[error("argon2 failed to hash the password")]
    Hashing,

    #[error("user store: {0}")]
    Store(#[from] RepositoryError),
}
