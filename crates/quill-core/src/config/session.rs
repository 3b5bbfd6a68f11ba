//! Session framework configuration.

use serde::{Deserialize, Serialize};

/// Session framework settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session cookies (HMAC-SHA256).
    #[serde(default)]
    pub secret: Option<String>,
    /// Callback base URL of the application.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum session age in hours.
    #[serde(default = "default_max_age")]
    pub max_age_hours: u64,
    /// File holding the signed session cookie between CLI invocations.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            base_url: None,
            max_age_hours: default_max_age(),
            cookie_path: default_cookie_path(),
        }
    }
}

fn default_max_age() -> u64 {
    720
}

fn default_cookie_path() -> String {
    "data/session.cookie".to_string()
}
