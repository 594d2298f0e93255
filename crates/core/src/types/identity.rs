//! Authenticated identity types.
//!
//! Credentials never pass through this crate; the gateway authenticates and
//! returns a [`User`], which is all the application records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The authenticated user's identity as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Account role controlling which areas of the site an identity may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Error parsing a role string.
#[derive(Debug, Error)]
#[error("invalid role: {0}")]
pub struct ParseRoleError(String);

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_display_and_parse() {
        for role in [Role::Customer, Role::Admin] {
            let parsed: Role = role.to_string().parse().expect("should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_is_an_error() {
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn user_deserializes_lowercase_role() {
        let json = serde_json::json!({
            "id": "U-3",
            "name": "Asha",
            "email": "asha@example.net",
            "role": "admin"
        });

        let user: User = serde_json::from_value(json).expect("should parse");
        assert!(user.role.is_admin());
    }
}
