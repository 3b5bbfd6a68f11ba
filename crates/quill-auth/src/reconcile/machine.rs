//! Identity reconciliation controller.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use quill_core::config::PagesConfig;
use quill_core::error::AppError;
use quill_core::result::AppResult;
use quill_core::traits::CredentialStore;
use quill_entity::{ExchangeRequest, ResolvedIdentity, ResolvedUser, SessionStatus};
use quill_store::fingerprint;

use super::liveness::Liveness;
use super::reducer::{DirectResult, reduce};
use crate::traits::{CredentialExchange, IdentityVerifier, SessionFramework};

/// Error published when a stored credential cannot be verified.
pub const VERIFICATION_FAILED: &str = "Failed to authenticate";

/// Error published when a direct login exchange fails.
pub const LOGIN_FAILED: &str = "Login failed";

/// Result of a logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Where the browser goes next.
    pub redirect: String,
    /// Whether the framework confirmed its own teardown.
    pub framework_cleared: bool,
}

#[derive(Debug)]
struct Inner {
    framework: SessionStatus,
    direct: DirectResult,
    liveness: Liveness,
}

/// Reconciles the framework session with the directly held credential and
/// publishes one [`ResolvedIdentity`].
///
/// This is the only writer of the credential store.
pub struct IdentityReconciler {
    /// Persistent credential slot.
    store: Arc<dyn CredentialStore>,
    /// Backend identity lookup.
    verifier: Arc<dyn IdentityVerifier>,
    /// Backend credential issuance for direct login.
    exchange: Option<Arc<dyn CredentialExchange>>,
    /// Framework teardown.
    framework: Arc<dyn SessionFramework>,
    /// Redirect after sign-out.
    sign_out_redirect: String,
    /// Both identity sources plus the liveness generation.
    inner: Mutex<Inner>,
    /// Published identity.
    tx: watch::Sender<ResolvedIdentity>,
}

impl std::fmt::Debug for IdentityReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityReconciler")
            .field("store", &self.store)
            .field("sign_out_redirect", &self.sign_out_redirect)
            .field("identity", &*self.tx.borrow())
            .finish()
    }
}

impl IdentityReconciler {
    /// Creates a reconciler in the `Loading` state.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        verifier: Arc<dyn IdentityVerifier>,
        framework: Arc<dyn SessionFramework>,
        pages: &PagesConfig,
    ) -> Self {
        let (tx, _) = watch::channel(ResolvedIdentity::loading());
        Self {
            store,
            verifier,
            exchange: None,
            framework,
            sign_out_redirect: pages.sign_out_redirect.clone(),
            inner: Mutex::new(Inner {
                framework: SessionStatus::Loading,
                direct: DirectResult::Idle,
                liveness: Liveness::default(),
            }),
            tx,
        }
    }

    /// Enables [`IdentityReconciler::login_direct`].
    pub fn with_exchange(mut self, exchange: Arc<dyn CredentialExchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// The identity as currently published.
    pub fn current(&self) -> ResolvedIdentity {
        self.tx.borrow().clone()
    }

    /// Subscribe to identity changes.
    pub fn subscribe(&self) -> watch::Receiver<ResolvedIdentity> {
        self.tx.subscribe()
    }

    /// Feeds a framework session report into the machine.
    ///
    /// An authenticated session with a credential persists it and supersedes
    /// the direct path. An unauthenticated report starts direct verification
    /// of any stored credential, unless one already ran.
    pub async fn observe_session(&self, status: SessionStatus) -> ResolvedIdentity {
        let (credential, token) = {
            let mut inner = self.lock();
            inner.framework = status;

            match &inner.framework {
                SessionStatus::Loading => return self.publish(&inner),
                SessionStatus::Authenticated(session) => {
                    if let Some(credential) = session.credential() {
                        self.persist(credential);
                    }
                    inner.liveness.revoke();
                    inner.direct = DirectResult::Idle;
                    return self.publish(&inner);
                }
                SessionStatus::Unauthenticated => {}
            }

            if matches!(
                inner.direct,
                DirectResult::Pending
                    | DirectResult::Verified(_)
                    | DirectResult::NoCredential
                    | DirectResult::Failed { .. }
            ) {
                return self.publish(&inner);
            }

            let stored = match self.store.get() {
                Ok(stored) => stored.filter(|c| !c.trim().is_empty()),
                Err(e) => {
                    warn!(error = %e, "Failed to read credential store");
                    None
                }
            };

            let Some(credential) = stored else {
                inner.direct = DirectResult::NoCredential;
                return self.publish(&inner);
            };

            inner.direct = DirectResult::Pending;
            self.publish(&inner);
            (credential, inner.liveness.token())
        };

        debug!(credential = %fingerprint(&credential), "Verifying stored credential");
        let result = self.verifier.fetch_identity(&credential).await;

        let mut inner = self.lock();
        if !inner.liveness.is_live(token) {
            debug!("Discarding superseded verification result");
            return self.current();
        }

        match result {
            Ok(user) => {
                info!(user_id = %user.id, "Stored credential verified");
                inner.direct = DirectResult::Verified(ResolvedUser::from(user));
            }
            Err(e) if e.invalidates_credential() => {
                warn!(error = %e, "Stored credential rejected, clearing it");
                inner.direct = DirectResult::Failed {
                    message: VERIFICATION_FAILED.to_string(),
                    cleared: false,
                };
                self.publish(&inner);
                self.discard();
                inner.direct = DirectResult::Failed {
                    message: VERIFICATION_FAILED.to_string(),
                    cleared: true,
                };
            }
            Err(e) => {
                warn!(error = %e, "Stored credential could not be verified, keeping it");
                inner.direct = DirectResult::Failed {
                    message: VERIFICATION_FAILED.to_string(),
                    cleared: false,
                };
            }
        }
        self.publish(&inner)
    }

    /// Signs in directly against the backend, bypassing the framework.
    ///
    /// Persists the issued credential and resolves `DirectAuthenticated`.
    /// Refused while anyone is signed in. A failed attempt only changes the
    /// published identity when no credential is held.
    pub async fn login_direct(&self, name: &str, email: &str) -> AppResult<ResolvedIdentity> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(AppError::validation("Please enter both email and name"));
        }
        let exchange = self
            .exchange
            .as_ref()
            .ok_or_else(|| AppError::configuration("Direct login is not enabled"))?;

        if self.current().is_authenticated() {
            return Err(AppError::validation("Already signed in"));
        }

        let request = ExchangeRequest {
            name: Some(name.to_string()),
            email: email.to_string(),
            image: Some(avatar_url(name)),
            google_id: format!("test-user-{}", Utc::now().timestamp_millis()),
        };

        let token = self.lock().liveness.token();
        let result = exchange.exchange(&request).await;

        let mut inner = self.lock();
        if !inner.liveness.is_live(token) {
            debug!("Discarding superseded direct login result");
            return Err(AppError::authentication("Login was superseded"));
        }

        match result {
            Ok(issued) => {
                self.persist(&issued.token);
                inner.liveness.revoke();
                inner.framework = SessionStatus::Unauthenticated;
                inner.direct = DirectResult::Verified(ResolvedUser::from(issued.user));
                info!(user_id = %issued.user_id, "Direct login succeeded");
                Ok(self.publish(&inner))
            }
            Err(e) => {
                warn!(error = %e, "Direct login failed");
                let holds_nothing = matches!(
                    inner.direct,
                    DirectResult::Idle
                        | DirectResult::NoCredential
                        | DirectResult::Failed { cleared: true, .. }
                );
                if holds_nothing && matches!(inner.framework, SessionStatus::Unauthenticated) {
                    inner.direct = DirectResult::Failed {
                        message: LOGIN_FAILED.to_string(),
                        cleared: true,
                    };
                    self.publish(&inner);
                }
                Err(AppError::with_source(e.kind, LOGIN_FAILED, e))
            }
        }
    }

    /// Logs out unconditionally.
    ///
    /// Local state is cleared before the framework is asked to sign out, so a
    /// failing framework call still leaves the user logged out.
    pub async fn logout(&self) -> LogoutOutcome {
        {
            let mut inner = self.lock();
            inner.liveness.revoke();
            self.discard();
            inner.direct = DirectResult::NoCredential;
            inner.framework = SessionStatus::Unauthenticated;
            self.publish(&inner);
        }
        info!("Local identity cleared");

        match self.framework.sign_out(&self.sign_out_redirect).await {
            Ok(redirect) => LogoutOutcome {
                redirect,
                framework_cleared: true,
            },
            Err(e) => {
                warn!(error = %e, "Framework sign-out failed, local state already cleared");
                LogoutOutcome {
                    redirect: self.sign_out_redirect.clone(),
                    framework_cleared: false,
                }
            }
        }
    }

    /// Stops applying results of calls still in flight, e.g. when the
    /// consumer goes away.
    ///
    /// A verification cut short this way is forgotten, so the next
    /// unauthenticated report starts it again.
    pub fn detach(&self) {
        let mut inner = self.lock();
        inner.liveness.revoke();
        if inner.direct == DirectResult::Pending {
            inner.direct = DirectResult::Idle;
        }
        debug!("Reconciler detached");
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, inner: &Inner) -> ResolvedIdentity {
        let identity = reduce(&inner.framework, &inner.direct);
        let previous = self.tx.send_replace(identity.clone());
        if previous.state() != identity.state() {
            info!(from = %previous.state(), to = %identity.state(), "Identity state changed");
        }
        identity
    }

    fn persist(&self, credential: &str) {
        if let Err(e) = self.store.set(credential) {
            error!(error = %e, credential = %fingerprint(credential), "Failed to persist credential");
        }
    }

    fn discard(&self) {
        if let Err(e) = self.store.clear() {
            error!(error = %e, "Failed to clear credential store");
        }
    }
}

/// Placeholder avatar for users who signed in without a provider.
fn avatar_url(name: &str) -> String {
    let name: Vec<&str> = name.split_whitespace().collect();
    format!("https://ui-avatars.com/api/?name={}&background=random", name.join("+"))
}
