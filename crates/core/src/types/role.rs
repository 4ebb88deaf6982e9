//! User roles.

use serde::{Deserialize, Serialize};

/// Account role controlling access to admin-only endpoints.
///
/// Stored in the `users.role` column and in the session. Admins may list
/// users and view another user's cart; customers only touch their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular shopper. Can only operate on their own cart.
    #[default]
    Customer,
    /// Staff account. Can list users and inspect any cart.
    Admin,
}

impl UserRole {
    /// Whether this role grants access to admin-only endpoints.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::Customer).unwrap(),
            "\"customer\""
        );
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");

        let parsed: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert!(parsed.is_admin());
    }
}
