//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! CHAMP_USER_PASSWORD='...' champ-cli user create -e admin@example.com -n "Admin Name" -r admin
//! ```
//!
//! Without `CHAMP_USER_PASSWORD` the password is read from the first line of
//! stdin.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use champ_core::{Email, EmailError, UserId, UserRole};
use champ_storefront::services::{AuthError, AuthService};

/// Environment variable holding the new user's password.
pub const PASSWORD_ENV: &str = "CHAMP_USER_PASSWORD";

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, user")]
    InvalidRole(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No password in the environment or on stdin.
    #[error("No password given (set {PASSWORD_ENV} or pipe it on stdin)")]
    MissingPassword,

    /// Reading stdin failed.
    #[error("Failed to read password: {0}")]
    Io(#[from] std::io::Error),

    /// Creating the user failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a new user with an Argon2-hashed password.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns an error for an unknown role, a missing or weak password, an
/// invalid or taken email, or a database failure.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
) -> Result<UserId, Box<dyn std::error::Error>> {
    let role: UserRole = role
        .parse()
        .map_err(|_| UserCommandError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email).map_err(UserCommandError::from)?;

    let password = read_password().await?;

    let pool = super::connect().await?;

    tracing::info!("Creating user: {} ({})", email.as_str(), role);
    let user = AuthService::new(&pool)
        .create_user(&email, name, password.expose_secret(), role)
        .await
        .map_err(UserCommandError::from)?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email.as_str(),
        user.role
    );

    Ok(user.id)
}

async fn read_password() -> Result<SecretString, UserCommandError> {
    if let Some(value) = std::env::var(PASSWORD_ENV).ok().filter(|v| !v.is_empty()) {
        return Ok(SecretString::from(value));
    }

    tracing::info!("Enter password:");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;

    password_from_line(&line).ok_or(UserCommandError::MissingPassword)
}

/// Strip the line ending; an empty line means no password.
fn password_from_line(line: &str) -> Option<SecretString> {
    let password = line.trim_end_matches(['\r', '\n']);
    (!password.is_empty()).then(|| SecretString::from(password.to_owned()))
}
