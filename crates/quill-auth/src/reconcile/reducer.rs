//! Pure reconciliation of the framework session and the direct path.

use quill_entity::{AuthState, ResolvedIdentity, ResolvedUser, Session, SessionStatus};

/// Progress of direct verification of a stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectResult {
    /// Nothing attempted yet.
    Idle,
    /// No stored credential to verify.
    NoCredential,
    /// Verification call in flight.
    Pending,
    /// The backend resolved the stored credential.
    Verified(ResolvedUser),
    /// Verification failed.
    Failed {
        /// Human-readable error.
        message: String,
        /// Whether the stored credential has been removed yet.
        cleared: bool,
    },
}

/// Merges both identity sources into the published identity.
///
/// An authenticated framework session always wins; the direct path only
/// counts while the framework reports `unauthenticated`.
pub fn reduce(framework: &SessionStatus, direct: &DirectResult) -> ResolvedIdentity {
    match framework {
        SessionStatus::Loading => ResolvedIdentity::loading(),
        SessionStatus::Authenticated(session) => match session.credential() {
            Some(_) => ResolvedIdentity::derive(
                AuthState::FrameworkAuthenticated,
                Some(session_user(session)),
                None,
            ),
            None => ResolvedIdentity::derive(AuthState::Unauthenticated, None, None),
        },
        SessionStatus::Unauthenticated => match direct {
            DirectResult::Idle | DirectResult::Pending => ResolvedIdentity::loading(),
            DirectResult::NoCredential => {
                ResolvedIdentity::derive(AuthState::Unauthenticated, None, None)
            }
            DirectResult::Verified(user) => {
                ResolvedIdentity::derive(AuthState::DirectAuthenticated, Some(user.clone()), None)
            }
            DirectResult::Failed { message, cleared } => {
                let state = if *cleared {
                    AuthState::Unauthenticated
                } else {
                    AuthState::DirectError
                };
                ResolvedIdentity::derive(state, None, Some(message.clone()))
            }
        },
    }
}

fn session_user(session: &Session) -> ResolvedUser {
    ResolvedUser {
        id: session.user.id.clone(),
        name: session.user.name.clone().unwrap_or_default(),
        email: session.user.email.clone().unwrap_or_default(),
        image: session.user.image.clone(),
        role: session.user.role.clone(),
    }
}
