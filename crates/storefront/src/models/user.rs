//! User domain types.

use chrono::{DateTime, Utc};

use champ_core::{Email, UserId, UserRole};

/// A storefront user.
///
/// Admins and shoppers share the table; `role` decides what they may do.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Name shown in the admin panel.
    pub display_name: String,
    /// Access level.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
