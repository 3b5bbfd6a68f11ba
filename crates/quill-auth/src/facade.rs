//! Read-only access to the resolved identity.

use std::sync::Arc;

use tokio::sync::watch;

use quill_core::error::AppError;
use quill_core::result::AppResult;
use quill_entity::{ResolvedIdentity, ResolvedUser};

use crate::reconcile::{IdentityReconciler, LogoutOutcome};

/// The sanctioned way for the rest of the application to read identity.
///
/// Views never touch the session framework or the credential store; they
/// read through this context and sign out through [`AuthContext::logout`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    reconciler: Arc<IdentityReconciler>,
    rx: watch::Receiver<ResolvedIdentity>,
}

impl AuthContext {
    /// Creates a context reading from `reconciler`.
    pub fn new(reconciler: Arc<IdentityReconciler>) -> Self {
        let rx = reconciler.subscribe();
        Self { reconciler, rx }
    }

    /// The identity as currently published.
    pub fn snapshot(&self) -> ResolvedIdentity {
        self.rx.borrow().clone()
    }

    /// The signed-in user, from whichever path resolved it.
    pub fn user(&self) -> Option<ResolvedUser> {
        self.rx.borrow().user().cloned()
    }

    /// True until the framework and any stored credential have been checked.
    pub fn loading(&self) -> bool {
        self.rx.borrow().is_loading()
    }

    /// A message safe to show, set after a failed verification or login.
    pub fn error(&self) -> Option<String> {
        self.rx.borrow().error().map(str::to_string)
    }

    /// Whether either path produced a user.
    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Advisory only. The backend enforces roles on every request.
    pub fn is_admin(&self) -> bool {
        self.rx.borrow().is_admin()
    }

    /// Logs out through the reconciler.
    pub async fn logout(&self) -> LogoutOutcome {
        self.reconciler.logout().await
    }

    /// Waits for the next published identity.
    pub async fn changed(&mut self) -> AppResult<ResolvedIdentity> {
        self.rx
            .changed()
            .await
            .map_err(|_| AppError::internal("Identity reconciler dropped"))?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Waits until resolution leaves the loading state.
    pub async fn settled(&mut self) -> AppResult<ResolvedIdentity> {
        let identity = self
            .rx
            .wait_for(|identity| !identity.is_loading())
            .await
            .map_err(|_| AppError::internal("Identity reconciler dropped"))?;
        Ok(identity.clone())
    }
}
