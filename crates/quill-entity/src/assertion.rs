//! Identity provider assertion.

use serde::{Deserialize, Serialize};

/// Provider-issued proof of identity, alive only during the callback exchange.
///
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAssertion {
    /// Provider subject identifier.
    pub subject: String,
    /// Display name.
    pub name: Option<String>,
    /// Email address, if the provider released one.
    pub email: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
}

impl ProviderAssertion {
    /// Creates an assertion carrying only a subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            name: None,
            email: None,
            image: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the avatar URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The email, if present and non-blank.
    pub fn usable_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}
