//! Seams between the identity layer and its external collaborators.

use async_trait::async_trait;

use quill_core::result::AppResult;
use quill_entity::{BackendUser, ExchangeRequest, IssuedCredential};

/// The backend's credential-issuance contract (`POST /auth/google`).
#[async_trait]
pub trait CredentialExchange: Send + Sync + 'static {
    /// Exchange a provider-asserted identity for a backend credential.
    ///
    /// Any failure (transport, non-2xx, malformed body) is an error.
    async fn exchange(&self, request: &ExchangeRequest) -> AppResult<IssuedCredential>;
}

/// The backend's identity-lookup contract (`GET /auth/me`).
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Resolve a bearer credential into the user it belongs to.
    async fn fetch_identity(&self, credential: &str) -> AppResult<BackendUser>;
}

/// The session framework's own teardown.
#[async_trait]
pub trait SessionFramework: Send + Sync + 'static {
    /// Destroy the framework session and return the redirect target.
    async fn sign_out(&self, callback_url: &str) -> AppResult<String>;
}
