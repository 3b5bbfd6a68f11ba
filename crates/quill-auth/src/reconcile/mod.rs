//! Identity reconciliation.
//!
//! [`reduce`] is the pure merge of both identity sources;
//! [`IdentityReconciler`] drives it from framework reports, direct
//! verification, logout, and teardown.

pub mod liveness;
pub mod machine;
pub mod reducer;

pub use liveness::{Liveness, LivenessToken};
pub use machine::{IdentityReconciler, LOGIN_FAILED, LogoutOutcome, VERIFICATION_FAILED};
pub use reducer::{DirectResult, reduce};
