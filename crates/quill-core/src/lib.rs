//! # quill-core
//!
//! Core crate for Quill identity. Contains configuration schemas, the
//! credential store trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Quill crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
