//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use copper_kettle_core::{Email, UserId, UserRole};

/// A registered user.
///
/// The password hash never leaves the repository layer, so this type is safe
/// to serialize into API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Minimal user listing entry for the admin dropdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}
