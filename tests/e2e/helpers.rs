//! Shared harness for end-to-end identity flows.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use quill_auth::{
    AuthContext, CookieJar, CredentialExchange, IdentityReconciler, IdentityVerifier,
    LocalSessionFramework, SessionCodec, SignInBridge,
};
use quill_core::config::{OAuthConfig, PagesConfig, SessionConfig};
use quill_core::error::AppError;
use quill_core::result::AppResult;
use quill_core::traits::CredentialStore;
use quill_entity::{BackendUser, ExchangeRequest, IssuedCredential, ResolvedIdentity};
use quill_store::FileCredentialStore;

/// In-process stand-in for the backend trust authority.
#[derive(Default)]
pub struct FakeBackend {
    tokens: Mutex<HashMap<String, BackendUser>>,
    down: Mutex<bool>,
    issued: Mutex<u32>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Invalidates a token server-side.
    pub fn revoke(&self, token: &str) {
        self.tokens.lock().unwrap().remove(token);
    }

    pub fn set_down(&self, down: bool) {
        *self.down.lock().unwrap() = down;
    }
}

#[async_trait]
impl CredentialExchange for FakeBackend {
    async fn exchange(&self, request: &ExchangeRequest) -> AppResult<IssuedCredential> {
        if *self.down.lock().unwrap() {
            return Err(AppError::network_unavailable("backend down"));
        }
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;
        let token = format!("tok-{}", *issued);
        let role = if request.email.starts_with("admin") { "admin" } else { "user" };
        let user = BackendUser {
            id: format!("u{}", *issued),
            name: request.name.clone(),
            email: Some(request.email.clone()),
            image: request.image.clone(),
            role: Some(role.to_string()),
        };
        self.tokens.lock().unwrap().insert(token.clone(), user.clone());
        Ok(IssuedCredential {
            token,
            user_id: user.id.clone(),
            role: user.role.clone(),
            user,
        })
    }
}

#[async_trait]
impl IdentityVerifier for FakeBackend {
    async fn fetch_identity(&self, credential: &str) -> AppResult<BackendUser> {
        if *self.down.lock().unwrap() {
            return Err(AppError::network_unavailable("backend down"));
        }
        self.tokens
            .lock()
            .unwrap()
            .get(credential)
            .cloned()
            .ok_or_else(|| AppError::credential_invalid("401 Unauthorized"))
    }
}

/// One simulated browser page over persistent cookie and local storage files.
pub struct Page {
    pub framework: Arc<LocalSessionFramework>,
    pub reconciler: Arc<IdentityReconciler>,
    pub context: AuthContext,
}

impl Page {
    /// Runs the page-load sequence and waits for identity to settle.
    pub async fn load(&mut self) -> ResolvedIdentity {
        self.reconciler.observe_session(self.framework.status()).await;
        self.context.settled().await.unwrap()
    }
}

/// A browser profile: cookie file plus local storage file.
pub struct Browser {
    _dir: TempDir,
    pub cookie_path: PathBuf,
    pub backend: Arc<FakeBackend>,
    pub store: Arc<FileCredentialStore>,
}

impl Browser {
    pub fn new(backend: Arc<FakeBackend>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let cookie_path = dir.path().join("session.cookie");
        let store = Arc::new(FileCredentialStore::new(
            dir.path().join("local-storage.json"),
            "auth_token",
        ));
        Self {
            _dir: dir,
            cookie_path,
            backend,
            store,
        }
    }

    pub fn stored_credential(&self) -> Option<String> {
        self.store.get().unwrap()
    }

    /// Opens a fresh page, as after a reload.
    pub fn open(&self) -> Page {
        let bridge = SignInBridge::new(
            self.backend.clone(),
            &OAuthConfig::default(),
            &PagesConfig::default(),
        );
        let codec = SessionCodec::new(&SessionConfig {
            secret: Some("e2e-secret".into()),
            ..SessionConfig::default()
        })
        .unwrap();
        let framework = Arc::new(LocalSessionFramework::new(
            bridge,
            codec,
            CookieJar::file(&self.cookie_path),
        ));
        let reconciler = Arc::new(
            IdentityReconciler::new(
                self.store.clone(),
                self.backend.clone(),
                framework.clone(),
                &PagesConfig::default(),
            )
            .with_exchange(self.backend.clone()),
        );
        let context = AuthContext::new(reconciler.clone());
        Page {
            framework,
            reconciler,
            context,
        }
    }
}
