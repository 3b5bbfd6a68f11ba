//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// OAuth identity provider settings.
///
/// Only the presence of the client credentials matters to the identity
/// layer; the values are consumed by the provider handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Name of the only provider whose assertions are exchanged with the backend.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            client_id: None,
            client_secret: None,
        }
    }
}

fn default_provider() -> String {
    "google".to_string()
}
