//! Session propagation pipeline.
//!
//! Stage order is fixed: the sign-in bridge runs in the provider callback,
//! [`enrich_token`] folds its result into the session token, and
//! [`materialize_session`] builds the client session from that token on
//! every read.

pub mod codec;
pub mod stages;

pub use codec::SessionCodec;
pub use stages::{enrich_token, materialize_session};
