//! Persistent credential store trait.

use crate::result::AppResult;

/// Single-slot durable storage for the backend bearer credential.
///
/// Implementations are synchronous so the slot can be read on cold start,
/// before any network activity. Writes are last-write-wins and idempotent;
/// no expiry metadata is kept (the backend rejects stale credentials).
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the stored credential, if any.
    fn get(&self) -> AppResult<Option<String>>;

    /// Store a credential, overwriting any previous value.
    fn set(&self, credential: &str) -> AppResult<()>;

    /// Remove the stored credential. Clearing an empty slot is not an error.
    fn clear(&self) -> AppResult<()>;

    /// Whether a credential is currently stored.
    fn contains(&self) -> AppResult<bool> {
        Ok(self.get()?.is_some())
    }
}
