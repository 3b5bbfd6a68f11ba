//! Unified application error types for Quill.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Authentication failed for a reason other than an invalid credential.
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// The backend refused or failed the provider assertion exchange.
    ProviderExchange,
    /// The backend rejected a stored bearer credential.
    CredentialInvalid,
    /// The backend could not be reached.
    NetworkUnavailable,
    /// The session framework could not complete its sign-out.
    LogoutPartial,
    /// A session cookie could not be issued or read.
    Session,
    /// The credential store could not be read or written.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The backend answered with an unexpected status or body.
    ExternalService,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::ProviderExchange => write!(f, "PROVIDER_EXCHANGE"),
            Self::CredentialInvalid => write!(f, "CREDENTIAL_INVALID"),
            Self::NetworkUnavailable => write!(f, "NETWORK_UNAVAILABLE"),
            Self::LogoutPartial => write!(f, "LOGOUT_PARTIAL"),
            Self::Session => write!(f, "SESSION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Quill.
///
/// `message` carries diagnostic detail for logs. Presentation code must use
/// [`AppError::user_message`] instead, which never leaks transport details.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A diagnostic error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a provider exchange error.
    pub fn provider_exchange(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ProviderExchange, message)
    }

    /// Create a credential-invalid error.
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a network-unavailable error.
    pub fn network_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkUnavailable, message)
    }

    /// Create a partial logout error.
    pub fn logout_partial(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LogoutPartial, message)
    }

    /// Create a session error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Session, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Short human-readable text safe to show in the UI.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            ErrorKind::ProviderExchange => "Sign-in could not be completed",
            ErrorKind::CredentialInvalid
            | ErrorKind::NetworkUnavailable
            | ErrorKind::Authentication => "Failed to authenticate",
            ErrorKind::Authorization => "You do not have permission to do that",
            ErrorKind::Validation => "The request was not valid",
            ErrorKind::LogoutPartial => "Signed out locally",
            ErrorKind::Configuration => "There is a problem with the configuration",
            ErrorKind::Session
            | ErrorKind::Storage
            | ErrorKind::Serialization
            | ErrorKind::ExternalService
            | ErrorKind::Internal => "An unexpected error occurred",
        }
    }

    /// Whether this error means the stored credential must be discarded.
    pub fn invalidates_credential(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CredentialInvalid
                | ErrorKind::NetworkUnavailable
                | ErrorKind::ExternalService
                | ErrorKind::Serialization
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
