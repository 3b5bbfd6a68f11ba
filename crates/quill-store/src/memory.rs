//! In-memory credential store.

use std::sync::RwLock;

use quill_core::result::AppResult;
use quill_core::traits::CredentialStore;

/// Credential slot held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a credential.
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(credential.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> AppResult<Option<String>> {
        Ok(self.slot.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn set(&self, credential: &str) -> AppResult<()> {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(credential.to_string());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        self.slot.write().unwrap_or_else(|e| e.into_inner()).take();
        Ok(())
    }
}
