//! Pure propagation stages.
//!
//! The framework may run these several times per navigation, so each one
//! overwrites fields instead of accumulating them.

use tracing::debug;

use quill_entity::{Session, SessionToken, SignInCandidate};

/// Enrichment stage: copies the bridge's credential fields onto the token.
///
/// Only runs with a candidate at sign-in time; on later refreshes the
/// candidate is `None` and the token passes through unchanged.
pub fn enrich_token(mut token: SessionToken, candidate: Option<&SignInCandidate>) -> SessionToken {
    let Some(candidate) = candidate else {
        return token;
    };

    if let Some(credential) = candidate.credential.as_deref().filter(|c| !c.is_empty()) {
        debug!(sub = %token.sub, "Enriching session token with backend credential");
        token.backend_token = Some(credential.to_string());
        token.role = candidate.role.clone();
        token.id = candidate.user_id.clone();
    }

    token
}

/// Materialization stage: exposes the token's credential fields on the session.
pub fn materialize_session(mut session: Session, token: &SessionToken) -> Session {
    if let Some(credential) = token.backend_token.as_deref().filter(|c| !c.is_empty()) {
        session.backend_token = Some(credential.to_string());
        session.user.role = token.role.clone();
        session.user.id = token.id.clone();
    }

    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_entity::ProviderAssertion;

    fn base_token() -> SessionToken {
        SessionToken {
            sub: "google-sub".into(),
            name: Some("Ana".into()),
            email: Some("ana@example.com".into()),
            picture: None,
            backend_token: None,
            role: None,
            id: None,
            iat: 1_700_000_000,
            exp: 1_800_000_000,
            jti: "j1".into(),
        }
    }

    fn candidate_with_credential() -> SignInCandidate {
        let mut candidate = SignInCandidate::from(
            &ProviderAssertion::new("google-sub").with_email("ana@example.com"),
        );
        candidate.credential = Some("tok123".into());
        candidate.role = Some("admin".into());
        candidate.user_id = Some("u1".into());
        candidate
    }

    #[test]
    fn test_enrich_copies_credential_fields() {
        let token = enrich_token(base_token(), Some(&candidate_with_credential()));
        assert_eq!(token.backend_token.as_deref(), Some("tok123"));
        assert_eq!(token.role.as_deref(), Some("admin"));
        assert_eq!(token.id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_enrich_without_credential_is_noop() {
        let candidate = SignInCandidate::from(&ProviderAssertion::new("google-sub"));
        assert_eq!(enrich_token(base_token(), Some(&candidate)), base_token());
        assert_eq!(enrich_token(base_token(), None), base_token());
    }

    #[test]
    fn test_stages_are_idempotent() {
        let candidate = candidate_with_credential();
        let once = enrich_token(base_token(), Some(&candidate));
        let twice = enrich_token(once.clone(), Some(&candidate));
        assert_eq!(once, twice);

        let session_once = materialize_session(Session::from_token_defaults(&once), &once);
        let session_twice = materialize_session(session_once.clone(), &once);
        assert_eq!(session_once, session_twice);
        assert_eq!(session_twice.credential(), Some("tok123"));
        assert_eq!(session_twice.user.id.as_deref(), Some("u1"));
        assert_eq!(session_twice.user.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_refresh_keeps_enriched_fields() {
        let enriched = enrich_token(base_token(), Some(&candidate_with_credential()));
        let refreshed = enrich_token(enriched.clone(), None);
        assert_eq!(refreshed, enriched);
    }

    #[test]
    fn test_materialize_without_credential_leaves_defaults() {
        let token = base_token();
        let session = materialize_session(Session::from_token_defaults(&token), &token);
        assert_eq!(session.credential(), None);
        assert_eq!(session.user.id, None);
        assert_eq!(session.user.name.as_deref(), Some("Ana"));
    }
}
