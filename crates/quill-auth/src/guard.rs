//! Client-side route gating.
//!
//! Purely advisory: it decides what to render, never what the backend allows.

use quill_core::config::PagesConfig;
use quill_entity::ResolvedIdentity;

/// What a page requires of the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Admin,
}

/// What to do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity is still resolving; render nothing yet.
    Wait,
    Allow,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirement: Requirement,
    home: String,
}

impl RouteGuard {
    pub fn new(requirement: Requirement, pages: &PagesConfig) -> Self {
        Self {
            requirement,
            home: pages.home.clone(),
        }
    }

    pub fn decide(&self, identity: &ResolvedIdentity) -> GuardDecision {
        if identity.is_loading() {
            return GuardDecision::Wait;
        }
        let allowed = match self.requirement {
            Requirement::Authenticated => identity.is_authenticated(),
            Requirement::Admin => identity.is_admin(),
        };
        if allowed {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(self.home.clone())
        }
    }
}
