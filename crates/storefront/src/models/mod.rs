//! Domain models for the storefront.

pub mod product;
pub mod session;
pub mod user;

pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
