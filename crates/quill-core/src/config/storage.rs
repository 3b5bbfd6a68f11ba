//! Persistent credential store configuration.

use serde::{Deserialize, Serialize};

/// Location of the durable credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the key/value file backing the store.
    #[serde(default = "default_path")]
    pub path: String,
    /// Well-known key holding the bearer credential.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            key: default_key(),
        }
    }
}

fn default_path() -> String {
    "data/local-storage.json".to_string()
}

fn default_key() -> String {
    "auth_token".to_string()
}
