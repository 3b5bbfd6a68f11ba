//! Sign-in bridge between the identity provider callback and the backend.

pub mod error_code;
pub mod sign_in;

pub use error_code::SignInErrorCode;
pub use sign_in::{SignInBridge, SignInDecision};
