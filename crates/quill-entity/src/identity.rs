//! The resolved identity published to the rest of the application.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::ResolvedUser;

/// Reconciliation state of the current browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// The framework session or a direct verification is still outstanding.
    Loading,
    /// The framework session carries a backend credential.
    FrameworkAuthenticated,
    /// A stored credential was verified directly with the backend.
    DirectAuthenticated,
    /// Nobody is signed in.
    Unauthenticated,
    /// Direct verification failed while the stored credential is still held.
    DirectError,
}

impl AuthState {
    /// Whether a user is signed in.
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::FrameworkAuthenticated | Self::DirectAuthenticated)
    }

    /// Return the state as a snake_case string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::FrameworkAuthenticated => "framework_authenticated",
            Self::DirectAuthenticated => "direct_authenticated",
            Self::Unauthenticated => "unauthenticated",
            Self::DirectError => "direct_error",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single merged view of the current user.
///
/// Built only through [`ResolvedIdentity::derive`], so the flags always
/// agree with the state: a user is present exactly when the state is
/// authenticated, `loading` mirrors [`AuthState::Loading`], and `is_admin`
/// follows the user's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentity {
    state: AuthState,
    user: Option<ResolvedUser>,
    loading: bool,
    error: Option<String>,
    is_authenticated: bool,
    is_admin: bool,
}

impl ResolvedIdentity {
    /// Derives the published identity from a state, a candidate user, and an error.
    pub fn derive(state: AuthState, user: Option<ResolvedUser>, error: Option<String>) -> Self {
        let is_authenticated = state.is_authenticated();
        let user = if is_authenticated { user } else { None };
        let is_admin = user.as_ref().is_some_and(ResolvedUser::is_admin);

        Self {
            state,
            user,
            loading: state == AuthState::Loading,
            error,
            is_authenticated,
            is_admin,
        }
    }

    /// The initial identity before anything is known.
    pub fn loading() -> Self {
        Self::derive(AuthState::Loading, None, None)
    }

    /// Reconciliation state.
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// The current user, if signed in.
    pub fn user(&self) -> Option<&ResolvedUser> {
        self.user.as_ref()
    }

    /// Whether resolution is still in progress.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Human-readable error, if the last resolution failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Whether the signed-in user is an admin. Advisory only.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

impl Default for ResolvedIdentity {
    fn default() -> Self {
        Self::loading()
    }
}
