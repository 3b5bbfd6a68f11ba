//! Scripted fakes for the backend and framework seams.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use quill_core::AppError;
use quill_core::result::AppResult;
use quill_entity::{BackendUser, ExchangeRequest, IssuedCredential};

use crate::traits::{CredentialExchange, IdentityVerifier, SessionFramework};

/// Builds a backend user record.
pub fn backend_user(id: &str, name: &str, role: Option<&str>) -> BackendUser {
    BackendUser {
        id: id.to_string(),
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        image: None,
        role: role.map(str::to_string),
    }
}

/// Exchange that returns one scripted result and records every request.
///
/// When gated, each call signals `started` and then waits for `release`.
pub struct ScriptedExchange {
    result: AppResult<IssuedCredential>,
    requests: Mutex<Vec<ExchangeRequest>>,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedExchange {
    pub fn issuing(token: &str, user_id: &str, role: Option<&str>) -> Self {
        let user = backend_user(user_id, "Ana", role);
        Self {
            result: Ok(IssuedCredential {
                token: token.to_string(),
                user_id: user_id.to_string(),
                role: role.map(str::to_string),
                user,
            }),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing(error: AppError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Returns `(started, release)`.
    pub fn gated(mut self) -> (Self, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.gate = Some((started.clone(), release.clone()));
        (self, started, release)
    }

    pub fn requests(&self) -> Vec<ExchangeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialExchange for ScriptedExchange {
    async fn exchange(&self, request: &ExchangeRequest) -> AppResult<IssuedCredential> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }
        self.result.clone()
    }
}

/// Verifier answering per credential; unknown credentials get a 401 unless a
/// specific error was scripted for them.
///
/// When gated, each call signals `started` and then waits for `release`.
#[derive(Default)]
pub struct ScriptedVerifier {
    users: HashMap<String, BackendUser>,
    errors: HashMap<String, AppError>,
    calls: AtomicUsize,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepting(mut self, credential: &str, user: BackendUser) -> Self {
        self.users.insert(credential.to_string(), user);
        self
    }

    pub fn rejecting(mut self, credential: &str, error: AppError) -> Self {
        self.errors.insert(credential.to_string(), error);
        self
    }

    /// Returns `(started, release)`.
    pub fn gated(mut self) -> (Self, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.gate = Some((started.clone(), release.clone()));
        (self, started, release)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityVerifier for ScriptedVerifier {
    async fn fetch_identity(&self, credential: &str) -> AppResult<BackendUser> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }
        if let Some(error) = self.errors.get(credential) {
            return Err(error.clone());
        }
        self.users
            .get(credential)
            .cloned()
            .ok_or_else(|| AppError::credential_invalid("401 Unauthorized"))
    }
}

/// Framework that records sign-out calls and can be told to fail.
#[derive(Default)]
pub struct RecordingFramework {
    fail: bool,
    sign_outs: Mutex<Vec<String>>,
}

impl RecordingFramework {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sign_outs: Mutex::new(Vec::new()),
        }
    }

    pub fn sign_outs(&self) -> Vec<String> {
        self.sign_outs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionFramework for RecordingFramework {
    async fn sign_out(&self, callback_url: &str) -> AppResult<String> {
        self.sign_outs.lock().unwrap().push(callback_url.to_string());
        if self.fail {
            return Err(AppError::network_unavailable("sign-out endpoint unreachable"));
        }
        Ok(callback_url.to_string())
    }
}
