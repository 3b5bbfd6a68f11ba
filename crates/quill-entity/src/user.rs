//! User shapes as returned by the backend and as exposed to the application.

use serde::{Deserialize, Serialize};

/// Role string the backend assigns to administrators.
pub const ADMIN_ROLE: &str = "admin";

/// A user object as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    /// Backend user id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Role, e.g. `"admin"` or `"user"`.
    #[serde(default)]
    pub role: Option<String>,
}

/// The current user as every consumer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUser {
    /// Backend user id.
    pub id: Option<String>,
    /// Display name (empty when unknown).
    pub name: String,
    /// Email address (empty when unknown).
    pub email: String,
    /// Avatar URL.
    pub image: Option<String>,
    /// Role.
    pub role: Option<String>,
}

impl ResolvedUser {
    /// Whether this user carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

impl From<BackendUser> for ResolvedUser {
    fn from(user: BackendUser) -> Self {
        Self {
            id: Some(user.id),
            name: user.name.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            image: user.image,
            role: user.role,
        }
    }
}
