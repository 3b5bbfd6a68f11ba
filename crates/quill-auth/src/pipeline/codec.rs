//! Signed session cookie encoding and validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use quill_core::config::SessionConfig;
use quill_core::error::AppError;
use quill_entity::{SessionToken, SignInCandidate};

/// Issues and validates HS256-signed session tokens.
#[derive(Clone)]
pub struct SessionCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Session lifetime.
    max_age: Duration,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("max_age", &self.max_age)
            .finish()
    }
}

impl SessionCodec {
    /// Creates a codec from session configuration.
    pub fn new(config: &SessionConfig) -> Result<Self, AppError> {
        let secret = config
            .secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::configuration("session.secret is not set"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            max_age: Duration::hours(config.max_age_hours as i64),
        })
    }

    /// The framework's default token for a fresh sign-in, before enrichment.
    pub fn issue(&self, candidate: &SignInCandidate, now: DateTime<Utc>) -> SessionToken {
        SessionToken {
            sub: candidate.subject.clone(),
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            picture: candidate.image.clone(),
            backend_token: None,
            role: None,
            id: None,
            iat: now.timestamp(),
            exp: (now + self.max_age).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Signs a token into a cookie value.
    pub fn encode(&self, token: &SessionToken) -> Result<String, AppError> {
        encode(&Header::default(), token, &self.encoding_key)
            .map_err(|e| AppError::session(format!("Failed to encode session token: {e}")))
    }

    /// Verifies a cookie value and returns its token.
    pub fn decode(&self, cookie: &str) -> Result<SessionToken, AppError> {
        let data = decode::<SessionToken>(cookie, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::session("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::session("Invalid session signature")
                }
                _ => AppError::session(format!("Session validation failed: {e}")),
            },
        )?;

        Ok(data.claims)
    }
}
