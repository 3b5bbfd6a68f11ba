//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from a
//! TOML file, an optional environment overlay, and `QUILL__`-prefixed
//! environment variables. Each sub-module represents a logical section.

pub mod backend;
pub mod logging;
pub mod oauth;
pub mod pages;
pub mod session;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::backend::BackendConfig;
pub use self::logging::LoggingConfig;
pub use self::oauth::OAuthConfig;
pub use self::pages::PagesConfig;
pub use self::session::SessionConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend trust authority settings.
    pub backend: BackendConfig,
    /// Identity provider settings.
    pub oauth: OAuthConfig,
    /// Session framework settings.
    pub session: SessionConfig,
    /// Redirect targets.
    pub pages: PagesConfig,
    /// Persistent credential store settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Presence of each secret-bearing setting, never its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresenceReport {
    /// OAuth client id.
    pub client_id: bool,
    /// OAuth client secret.
    pub client_secret: bool,
    /// Callback base URL.
    pub base_url: bool,
    /// Session-signing secret.
    pub session_secret: bool,
}

impl PresenceReport {
    /// Names of the settings that are missing.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("oauth.client_id", self.client_id),
            ("oauth.client_secret", self.client_secret),
            ("session.base_url", self.base_url),
            ("session.secret", self.session_secret),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name)
        .collect()
    }
}

fn label(present: bool) -> &'static str {
    if present { "Present" } else { "Missing" }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file with an optional environment-specific overlay
    /// (`config/{env}`) and environment variables prefixed with `QUILL__`.
    pub fn load(path: &str, env: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));

        if let Some(env) = env {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("QUILL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Reports which secret-bearing settings are configured.
    pub fn presence(&self) -> PresenceReport {
        PresenceReport {
            client_id: is_set(&self.oauth.client_id),
            client_secret: is_set(&self.oauth.client_secret),
            base_url: is_set(&self.session.base_url),
            session_secret: is_set(&self.session.secret),
        }
    }

    /// Logs the presence report at `info` level.
    pub fn log_presence(&self) {
        let report = self.presence();
        tracing::info!(
            client_id = label(report.client_id),
            client_secret = label(report.client_secret),
            base_url = self.session.base_url.as_deref().unwrap_or("Missing"),
            session_secret = label(report.session_secret),
            "Identity environment"
        );
    }

    /// Checks the settings the signed session framework cannot run without.
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_set(&self.session.secret) {
            return Err(AppError::configuration(
                "session.secret is required to sign session cookies",
            ));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(AppError::configuration("backend.base_url must not be empty"));
        }
        if self.storage.key.trim().is_empty() {
            return Err(AppError::configuration("storage.key must not be empty"));
        }
        Ok(())
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
