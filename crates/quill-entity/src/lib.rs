//! # quill-entity
//!
//! Domain models shared by every Quill crate: provider assertions, backend
//! users and wire payloads, session shapes, and the resolved identity.

pub mod assertion;
pub mod exchange;
pub mod identity;
pub mod session;
pub mod user;

pub use assertion::ProviderAssertion;
pub use exchange::{ExchangeRequest, ExchangeResponse, IssuedCredential, MeResponse};
pub use identity::{AuthState, ResolvedIdentity};
pub use session::{Session, SessionStatus, SessionToken, SessionUser, SignInCandidate};
pub use user::{ADMIN_ROLE, BackendUser, ResolvedUser};
