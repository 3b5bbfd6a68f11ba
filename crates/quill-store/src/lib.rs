//! # quill-store
//!
//! Providers for the persistent credential store: an in-memory slot for
//! tests and embedded use, and a file-backed key/value store that mirrors
//! browser local storage (one JSON object, one well-known key).

pub mod file;
pub mod memory;

use std::sync::Arc;

use quill_core::config::StorageConfig;
use quill_core::traits::CredentialStore;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

/// Opens the durable store described by the configuration.
pub fn open(config: &StorageConfig) -> Arc<dyn CredentialStore> {
    Arc::new(FileCredentialStore::new(&config.path, &config.key))
}

/// Shortest credential whose prefix may appear in logs.
const MIN_FINGERPRINT_LEN: usize = 12;

/// Redacts a credential for log output.
///
/// Long credentials keep their first four characters; anything shorter is
/// fully masked.
pub fn fingerprint(credential: &str) -> String {
    if credential.chars().count() < MIN_FINGERPRINT_LEN {
        return "****".to_string();
    }
    let head: String = credential.chars().take(4).collect();
    format!("{head}…")
}
