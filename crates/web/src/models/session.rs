//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use tavolo_core::access::Viewer;
use tavolo_core::{Role, User};

/// Session-stored user identity.
///
/// The one durable per-visitor key: written verbatim on login or
/// registration, removed on logout, and treated as absent when the stored
/// value fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The viewer class this identity maps to for route decisions.
    #[must_use]
    pub const fn viewer(&self) -> Viewer {
        Viewer::from_role(Some(self.role))
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Session keys for per-visitor state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the visitor's cart.
    pub const CART: &str = "cart";
}
