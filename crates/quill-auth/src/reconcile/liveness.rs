//! Liveness tokens for in-flight verification calls.

/// Issued when a verification call starts; checked before its result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessToken(u64);

/// Generation counter bumped by every event that supersedes in-flight calls
/// (logout, an authenticated framework session, teardown).
#[derive(Debug, Default)]
pub struct Liveness {
    generation: u64,
}

impl Liveness {
    /// Token for a call starting now.
    pub fn token(&self) -> LivenessToken {
        LivenessToken(self.generation)
    }

    /// Invalidate every token issued so far.
    pub fn revoke(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether a result carrying `token` may still be applied.
    pub fn is_live(&self, token: LivenessToken) -> bool {
        token.0 == self.generation
    }
}
