//! Session shapes flowing through the propagation pipeline.
//!
//! A [`SignInCandidate`] exists only while the provider callback runs. Its
//! credential fields are copied into the long-lived [`SessionToken`], and
//! from there into every [`Session`] materialized for the client.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::assertion::ProviderAssertion;

/// The outgoing user object of a sign-in callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInCandidate {
    /// Provider subject identifier.
    pub subject: String,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
    /// Backend bearer credential attached by the sign-in bridge.
    pub credential: Option<String>,
    /// Backend role attached by the sign-in bridge.
    pub role: Option<String>,
    /// Backend user id attached by the sign-in bridge.
    pub user_id: Option<String>,
}

impl From<&ProviderAssertion> for SignInCandidate {
    fn from(assertion: &ProviderAssertion) -> Self {
        Self {
            subject: assertion.subject.clone(),
            name: assertion.name.clone(),
            email: assertion.email.clone(),
            image: assertion.image.clone(),
            credential: None,
            role: None,
            user_id: None,
        }
    }
}

/// Claims of the signed session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    /// Provider subject identifier.
    pub sub: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Backend bearer credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_token: Option<String>,
    /// Backend role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Backend user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token identifier.
    pub jti: String,
}

impl SessionToken {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// The user part of a materialized session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend user id.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
    /// Backend role.
    pub role: Option<String>,
}

/// The public session object handed to the client on each navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The signed-in user.
    pub user: SessionUser,
    /// Backend bearer credential, when the sign-in bridge obtained one.
    pub backend_token: Option<String>,
    /// When this session expires.
    pub expires: DateTime<Utc>,
}

impl Session {
    /// The default session shape the framework derives from its token,
    /// before any callback adds credential fields.
    pub fn from_token_defaults(token: &SessionToken) -> Self {
        Self {
            user: SessionUser {
                id: None,
                name: token.name.clone(),
                email: token.email.clone(),
                image: token.picture.clone(),
                role: None,
            },
            backend_token: None,
            expires: token.expires_at(),
        }
    }

    /// The backend credential, if present and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.backend_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// What the session framework currently reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "session", rename_all = "lowercase")]
pub enum SessionStatus {
    /// The framework has not determined the session yet.
    Loading,
    /// A session exists.
    Authenticated(Session),
    /// No session exists.
    Unauthenticated,
}

impl SessionStatus {
    /// The session, when authenticated.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Status name as the framework reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}
