//! Wire payloads of the backend's credential contracts.
//!
//! `POST /auth/google` exchanges a provider assertion for a bearer token;
//! `GET /auth/me` resolves a bearer token back into a user.

use serde::{Deserialize, Serialize};

use quill_core::error::AppError;

use crate::assertion::ProviderAssertion;
use crate::user::BackendUser;

/// Body of `POST /auth/google`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub image: Option<String>,
    /// Provider subject identifier.
    pub google_id: String,
}

impl ExchangeRequest {
    /// Builds the request from an assertion that carries an email.
    pub fn from_assertion(assertion: &ProviderAssertion, email: &str) -> Self {
        Self {
            name: assertion.name.clone(),
            email: email.to_string(),
            image: assertion.image.clone(),
            google_id: assertion.subject.clone(),
        }
    }
}

/// Body of a `200` answer to `POST /auth/google`, parsed leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeResponse {
    /// Issued bearer token.
    #[serde(default)]
    pub token: Option<String>,
    /// The backend's user record.
    #[serde(default)]
    pub user: Option<BackendUser>,
}

/// A credential the backend issued together with the identity it embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredential {
    /// Opaque bearer token.
    pub token: String,
    /// Backend user id.
    pub user_id: String,
    /// Role at issuance.
    pub role: Option<String>,
    /// Full user record.
    pub user: BackendUser,
}

impl ExchangeResponse {
    /// Validates that the body carries both a token and a user object.
    pub fn into_issued(self) -> Result<IssuedCredential, AppError> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::provider_exchange("Backend response carried no token"))?;
        let user = self
            .user
            .ok_or_else(|| AppError::provider_exchange("Backend response carried no user"))?;

        Ok(IssuedCredential {
            token,
            user_id: user.id.clone(),
            role: user.role.clone(),
            user,
        })
    }
}

/// Body of a `200` answer to `GET /auth/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeResponse {
    /// The user the bearer token belongs to.
    #[serde(default)]
    pub user: Option<BackendUser>,
}

impl MeResponse {
    /// Extracts the user, rejecting bodies without one.
    pub fn into_user(self) -> Result<BackendUser, AppError> {
        self.user
            .ok_or_else(|| AppError::external_service("Identity lookup returned no user"))
    }
}
