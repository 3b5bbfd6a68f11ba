//! Wires the identity layer together from configuration.

use std::sync::Arc;

use quill_auth::{
    AuthContext, CookieJar, IdentityReconciler, LocalSessionFramework, SessionCodec, SignInBridge,
};
use quill_backend::BackendClient;
use quill_core::config::AppConfig;
use quill_core::error::AppError;
use quill_core::traits::CredentialStore;
use quill_entity::ResolvedIdentity;

/// Everything one CLI invocation needs.
pub struct App {
    pub config: AppConfig,
    pub store: Arc<dyn CredentialStore>,
    pub framework: Arc<LocalSessionFramework>,
    pub reconciler: Arc<IdentityReconciler>,
    pub context: AuthContext,
}

impl App {
    pub fn build(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let backend = Arc::new(BackendClient::new(&config.backend)?);
        let store = quill_store::open(&config.storage);

        let bridge = SignInBridge::new(backend.clone(), &config.oauth, &config.pages);
        let codec = SessionCodec::new(&config.session)?;
        let framework = Arc::new(LocalSessionFramework::new(
            bridge,
            codec,
            CookieJar::file(&config.session.cookie_path),
        ));

        let reconciler = Arc::new(
            IdentityReconciler::new(store.clone(), backend.clone(), framework.clone(), &config.pages)
                .with_exchange(backend),
        );
        let context = AuthContext::new(reconciler.clone());

        tracing::debug!(
            backend = %config.backend.base_url,
            cookie = %config.session.cookie_path,
            store = %config.storage.path,
            "Identity layer initialized"
        );

        Ok(Self {
            config,
            store,
            framework,
            reconciler,
            context,
        })
    }

    /// Resolves identity the way a page load does: the framework session is
    /// observed first, then the reconciler settles.
    pub async fn resolve(&mut self) -> Result<ResolvedIdentity, AppError> {
        self.reconciler
            .observe_session(self.framework.status())
            .await;
        self.context.settled().await
    }
}
