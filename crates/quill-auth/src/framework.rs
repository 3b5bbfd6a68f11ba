//! In-process session framework.
//!
//! Owns the signed session cookie and drives the propagation stages: the
//! sign-in bridge on callback, token enrichment when the cookie is issued or
//! refreshed, and session materialization on every read.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use quill_core::error::AppError;
use quill_core::result::AppResult;
use quill_entity::{ProviderAssertion, Session, SessionStatus};

use crate::bridge::{SignInBridge, SignInDecision, SignInErrorCode};
use crate::pipeline::{SessionCodec, enrich_token, materialize_session};
use crate::traits::SessionFramework;

/// Where the session cookie lives.
#[derive(Debug)]
pub enum CookieJar {
    /// Held in memory for the lifetime of the process.
    Memory(Mutex<Option<String>>),
    /// Persisted in a file between processes.
    File(PathBuf),
}

impl CookieJar {
    /// An empty in-memory jar.
    pub fn memory() -> Self {
        Self::Memory(Mutex::new(None))
    }

    /// A jar backed by `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    fn load(&self) -> AppResult<Option<String>> {
        match self {
            Self::Memory(slot) => Ok(slot.lock().unwrap_or_else(|e| e.into_inner()).clone()),
            Self::File(path) => match fs::read_to_string(path) {
                Ok(raw) => Ok(Some(raw.trim().to_string()).filter(|c| !c.is_empty())),
                Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }

    fn save(&self, cookie: &str) -> AppResult<()> {
        match self {
            Self::Memory(slot) => {
                *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(cookie.to_string());
                Ok(())
            }
            Self::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, cookie)?;
                Ok(())
            }
        }
    }

    fn remove(&self) -> AppResult<()> {
        match self {
            Self::Memory(slot) => {
                slot.lock().unwrap_or_else(|e| e.into_inner()).take();
                Ok(())
            }
            Self::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Result of a provider callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// A session was created.
    SignedIn(Session),
    /// The bridge refused the attempt; no session exists.
    Rejected {
        /// Error code for the error page.
        code: SignInErrorCode,
        /// Where the browser is sent.
        redirect: String,
    },
}

/// Session framework running the propagation pipeline in-process.
#[derive(Debug)]
pub struct LocalSessionFramework {
    /// Post-sign-in stage.
    bridge: SignInBridge,
    /// Cookie signing.
    codec: SessionCodec,
    /// Cookie storage.
    jar: CookieJar,
}

impl LocalSessionFramework {
    /// Creates a framework over the given bridge, codec, and jar.
    pub fn new(bridge: SignInBridge, codec: SessionCodec, jar: CookieJar) -> Self {
        Self { bridge, codec, jar }
    }

    /// Handles a provider callback.
    pub async fn sign_in(
        &self,
        provider_name: &str,
        assertion: &ProviderAssertion,
    ) -> AppResult<SignInOutcome> {
        let candidate = match self.bridge.on_sign_in(provider_name, assertion).await {
            SignInDecision::Allow(candidate) => candidate,
            SignInDecision::Reject { code, redirect } => {
                info!(provider = provider_name, code = %code, "Sign-in rejected, no session created");
                return Ok(SignInOutcome::Rejected { code, redirect });
            }
        };

        let token = enrich_token(self.codec.issue(&candidate, Utc::now()), Some(&candidate));
        let cookie = self.codec.encode(&token)?;
        self.jar.save(&cookie)?;

        let session = materialize_session(Session::from_token_defaults(&token), &token);
        info!(
            provider = provider_name,
            with_credential = session.credential().is_some(),
            "Session created"
        );
        Ok(SignInOutcome::SignedIn(session))
    }

    /// Materializes the current session, as the client sees it on a navigation.
    ///
    /// An unreadable, forged, or expired cookie reads as unauthenticated.
    pub fn status(&self) -> SessionStatus {
        let cookie = match self.jar.load() {
            Ok(Some(cookie)) => cookie,
            Ok(None) => return SessionStatus::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "Failed to read session cookie");
                return SessionStatus::Unauthenticated;
            }
        };

        match self.codec.decode(&cookie) {
            Ok(token) => {
                let token = enrich_token(token, None);
                let session = materialize_session(Session::from_token_defaults(&token), &token);
                SessionStatus::Authenticated(session)
            }
            Err(e) => {
                debug!(error = %e, "Discarding invalid session cookie");
                SessionStatus::Unauthenticated
            }
        }
    }
}

#[async_trait]
impl SessionFramework for LocalSessionFramework {
    async fn sign_out(&self, callback_url: &str) -> AppResult<String> {
        self.jar
            .remove()
            .map_err(|e| AppError::logout_partial(format!("Failed to remove session cookie: {e}")))?;
        info!(redirect = callback_url, "Framework session destroyed");
        Ok(callback_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::ScriptedExchange;
    use quill_core::config::{OAuthConfig, PagesConfig, SessionConfig};

    fn framework(exchange: ScriptedExchange, jar: CookieJar) -> LocalSessionFramework {
        let bridge = SignInBridge::new(
            Arc::new(exchange),
            &OAuthConfig::default(),
            &PagesConfig::default(),
        );
        let codec = SessionCodec::new(&SessionConfig {
            secret: Some("s3cret".into()),
            ..SessionConfig::default()
        })
        .unwrap();
        LocalSessionFramework::new(bridge, codec, jar)
    }

    fn assertion() -> ProviderAssertion {
        ProviderAssertion::new("google-sub")
            .with_name("Ana")
            .with_email("ana@example.com")
    }

    #[tokio::test]
    async fn test_sign_in_materializes_credential() {
        let fw = framework(
            ScriptedExchange::issuing("tok123", "u1", Some("admin")),
            CookieJar::memory(),
        );
        assert_eq!(fw.status(), SessionStatus::Unauthenticated);

        let outcome = fw.sign_in("google", &assertion()).await.unwrap();
        let SignInOutcome::SignedIn(session) = outcome else {
            panic!("expected a session");
        };
        assert_eq!(session.credential(), Some("tok123"));

        let status = fw.status();
        let current = status.session().unwrap();
        assert_eq!(current.credential(), Some("tok123"));
        assert_eq!(current.user.id.as_deref(), Some("u1"));
        assert_eq!(current.user.role.as_deref(), Some("admin"));
        assert_eq!(fw.status(), status);
    }

    #[tokio::test]
    async fn test_rejected_sign_in_creates_no_session() {
        let fw = framework(
            ScriptedExchange::failing(AppError::external_service("500")),
            CookieJar::memory(),
        );
        let outcome = fw.sign_in("google", &assertion()).await.unwrap();
        assert!(matches!(outcome, SignInOutcome::Rejected { .. }));
        assert_eq!(fw.status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_sign_out_clears_cookie_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.cookie");
        let fw = framework(
            ScriptedExchange::issuing("tok123", "u1", None),
            CookieJar::file(&path),
        );
        fw.sign_in("google", &assertion()).await.unwrap();
        assert!(path.exists());

        let redirect = fw.sign_out("/").await.unwrap();
        assert_eq!(redirect, "/");
        assert!(!path.exists());
        assert_eq!(fw.status(), SessionStatus::Unauthenticated);
        fw.sign_out("/").await.unwrap();
    }

    #[tokio::test]
    async fn test_tampered_cookie_reads_unauthenticated() {
        let fw = framework(ScriptedExchange::issuing("tok", "u1", None), CookieJar::memory());
        fw.jar.save("not-a-jwt").unwrap();
        assert_eq!(fw.status(), SessionStatus::Unauthenticated);
    }
}
