//! Sign-in error codes carried to the error page as `?error=<code>`.

use std::fmt;

/// Why a sign-in attempt ended on the error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignInErrorCode {
    /// The server configuration is incomplete.
    Configuration,
    /// The sign-in callback refused the attempt.
    AccessDenied,
    /// A verification link expired or was reused.
    Verification,
    /// Anything else.
    Default,
}

impl SignInErrorCode {
    /// Parses the `error` query value; unknown codes map to [`Self::Default`].
    pub fn parse(code: Option<&str>) -> Self {
        match code.map(str::to_lowercase).as_deref() {
            Some("configuration") => Self::Configuration,
            Some("accessdenied") => Self::AccessDenied,
            Some("verification") => Self::Verification,
            _ => Self::Default,
        }
    }

    /// Query value for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration",
            Self::AccessDenied => "AccessDenied",
            Self::Verification => "Verification",
            Self::Default => "Default",
        }
    }

    /// Message shown on the error page.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Configuration => "There is a problem with the server configuration.",
            Self::AccessDenied => "You do not have permission to sign in.",
            Self::Verification => "The verification link is no longer valid.",
            Self::Default => "An error occurred during authentication.",
        }
    }

    /// Error page URL carrying this code.
    pub fn redirect_url(&self, error_page: &str) -> String {
        let separator = if error_page.contains('?') { '&' } else { '?' };
        format!("{error_page}{separator}error={}", self.as_str())
    }
}

impl fmt::Display for SignInErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
