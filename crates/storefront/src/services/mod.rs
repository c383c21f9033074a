//! Business logic services for the storefront.
//!
//! - `auth` - Password authentication and account creation

pub mod auth;

pub use auth::{AuthError, AuthService};
