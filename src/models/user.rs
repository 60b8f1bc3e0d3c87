//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Public user profile. The password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    /// Unique login used for Basic authentication
    pub login: String,
    /// Display name
    pub name: String,
    /// Avatar URL
    pub avatar: Option<String>,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Verification-only projection of a user row
#[derive(Debug, Clone, FromRow)]
pub struct Credentials {
    pub user_id: i64,
    pub password_hash: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    /// Login (username) - required and unique, used for authentication
    #[validate(length(min = 3, max = 64, message = "Login must be between 3 and 64 characters"))]
    pub login: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    /// Full name; takes precedence over first/last name
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub about: Option<String>,
}

impl RegisterUser {
    /// Display name: the full name when given, otherwise first and last name joined.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Row to insert for a new user (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub name: String,
    pub avatar: Option<String>,
    pub about: Option<String>,
    pub password_hash: String,
}

/// Update own profile request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub about: Option<String>,
}

/// User search query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Page size (default: 5)
    pub limit: Option<String>,
    /// Rows to skip (default: 0)
    pub offset: Option<String>,
    /// Substring matched against login and name
    pub search: Option<String>,
}

/// Filter handed to the user store
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: Option<&str>, first: Option<&str>, last: Option<&str>) -> RegisterUser {
        RegisterUser {
            login: "alice".to_string(),
            password: "secret".to_string(),
            name: name.map(String::from),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            avatar: None,
            about: None,
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(register(Some("Alice Liddell"), Some("A"), Some("L")).display_name(), "Alice Liddell");
    }

    #[test]
    fn test_display_name_from_parts() {
        assert_eq!(register(None, Some("Alice"), Some("Liddell")).display_name(), "Alice Liddell");
        assert_eq!(register(Some("  "), None, Some("Liddell")).display_name(), "Liddell");
        assert_eq!(register(None, None, None).display_name(), "");
    }

    #[test]
    fn test_register_validation() {
        let mut input = register(None, None, None);
        assert!(input.validate().is_ok());

        input.login = "al".to_string();
        assert!(input.validate().is_err());

        input.login = "alice".to_string();
        input.password = "abc".to_string();
        assert!(input.validate().is_err());
    }
}
