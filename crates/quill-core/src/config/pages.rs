//! Redirect target configuration.

use serde::{Deserialize, Serialize};

/// Paths the identity layer redirects to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Sign-in page.
    #[serde(default = "default_sign_in")]
    pub sign_in: String,
    /// Error page a rejected sign-in is sent to.
    #[serde(default = "default_error")]
    pub error: String,
    /// Redirect target after sign-out.
    #[serde(default = "default_root")]
    pub sign_out_redirect: String,
    /// Where route guards send users who lack access.
    #[serde(default = "default_root")]
    pub home: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            sign_in: default_sign_in(),
            error: default_error(),
            sign_out_redirect: default_root(),
            home: default_root(),
        }
    }
}

fn default_sign_in() -> String {
    "/auth/signin".to_string()
}

fn default_error() -> String {
    "/auth/error".to_string()
}

fn default_root() -> String {
    "/".to_string()
}
