//! # quill-auth
//!
//! Sign-in bridge, session propagation pipeline, identity reconciliation,
//! and the read-only facade the rest of the application consumes.
//!
//! Flow: provider callback → [`bridge::SignInBridge`] → [`pipeline`] stages
//! inside [`framework::LocalSessionFramework`] → [`reconcile::IdentityReconciler`]
//! → [`facade::AuthContext`] and [`guard::RouteGuard`].

pub mod bridge;
pub mod facade;
pub mod framework;
pub mod guard;
pub mod pipeline;
pub mod reconcile;
pub mod traits;

#[cfg(test)]
mod testing;

pub use bridge::{SignInBridge, SignInDecision, SignInErrorCode};
pub use facade::AuthContext;
pub use framework::{CookieJar, LocalSessionFramework, SignInOutcome};
pub use guard::{GuardDecision, Requirement, RouteGuard};
pub use pipeline::{SessionCodec, enrich_token, materialize_session};
pub use reconcile::{IdentityReconciler, LogoutOutcome};
pub use traits::{CredentialExchange, IdentityVerifier, SessionFramework};
