//! Post-sign-in hook: trades a provider assertion for a backend credential.

use std::sync::Arc;

use tracing::{info, warn};

use quill_core::config::{OAuthConfig, PagesConfig};
use quill_entity::{ExchangeRequest, ProviderAssertion, SignInCandidate};

use super::error_code::SignInErrorCode;
use crate::traits::CredentialExchange;

/// Outcome of the post-sign-in hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInDecision {
    /// Let the framework create a session from this candidate.
    Allow(SignInCandidate),
    /// Refuse the attempt; no session may be created.
    Reject {
        /// Error code for the error page.
        code: SignInErrorCode,
        /// Where the browser is sent.
        redirect: String,
    },
}

impl SignInDecision {
    /// The candidate, when the attempt was allowed.
    pub fn candidate(&self) -> Option<&SignInCandidate> {
        match self {
            Self::Allow(candidate) => Some(candidate),
            Self::Reject { .. } => None,
        }
    }

    /// Whether the attempt was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Exchanges provider identities for backend credentials during the callback.
///
/// Never touches the persistent credential store.
#[derive(Clone)]
pub struct SignInBridge {
    /// Backend credential issuance.
    exchange: Arc<dyn CredentialExchange>,
    /// The only provider whose assertions are exchanged.
    provider: String,
    /// Error page for rejected attempts.
    error_page: String,
}

impl std::fmt::Debug for SignInBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInBridge")
            .field("provider", &self.provider)
            .field("error_page", &self.error_page)
            .finish()
    }
}

impl SignInBridge {
    /// Creates a bridge for the configured provider.
    pub fn new(
        exchange: Arc<dyn CredentialExchange>,
        oauth: &OAuthConfig,
        pages: &PagesConfig,
    ) -> Self {
        Self {
            exchange,
            provider: oauth.provider.clone(),
            error_page: pages.error.clone(),
        }
    }

    /// Runs the exchange for one callback.
    ///
    /// Assertions from other providers, or without an email, pass through
    /// with no credential. For the supported provider every exchange failure
    /// rejects the attempt.
    pub async fn on_sign_in(
        &self,
        provider_name: &str,
        assertion: &ProviderAssertion,
    ) -> SignInDecision {
        let mut candidate = SignInCandidate::from(assertion);

        let Some(email) = assertion.usable_email() else {
            info!(provider = provider_name, "Sign-in without email, skipping backend exchange");
            return SignInDecision::Allow(candidate);
        };

        if provider_name != self.provider {
            info!(provider = provider_name, "Unsupported provider, skipping backend exchange");
            return SignInDecision::Allow(candidate);
        }

        let request = ExchangeRequest::from_assertion(assertion, email);
        match self.exchange.exchange(&request).await {
            Ok(issued) => {
                info!(
                    provider = provider_name,
                    user_id = %issued.user_id,
                    role = issued.role.as_deref().unwrap_or("-"),
                    "Backend credential issued"
                );
                candidate.credential = Some(issued.token);
                candidate.role = issued.role;
                candidate.user_id = Some(issued.user_id);
                SignInDecision::Allow(candidate)
            }
            Err(e) => {
                warn!(provider = provider_name, error = %e, "Backend exchange failed, rejecting sign-in");
                let code = SignInErrorCode::AccessDenied;
                SignInDecision::Reject {
                    code,
                    redirect: code.redirect_url(&self.error_page),
                }
            }
        }
    }
}
