//! End-to-end identity flows: bridge → pipeline → reconciler → facade.

mod helpers;

use quill_auth::SignInOutcome;
use quill_entity::{AuthState, ProviderAssertion};

use helpers::{Browser, FakeBackend};

fn google(email: &str) -> ProviderAssertion {
    ProviderAssertion::new("google-sub-1")
        .with_name("Ana Lima")
        .with_email(email)
}

#[tokio::test]
async fn test_provider_sign_in_resolves_framework_identity() {
    let browser = Browser::new(FakeBackend::new());
    let mut page = browser.open();

    let outcome = page
        .framework
        .sign_in("google", &google("admin@example.com"))
        .await
        .unwrap();
    assert!(matches!(outcome, SignInOutcome::SignedIn(_)));

    let identity = page.load().await;
    assert_eq!(identity.state(), AuthState::FrameworkAuthenticated);
    assert!(identity.is_admin());
    assert_eq!(identity.user().unwrap().email, "admin@example.com");
    assert_eq!(browser.stored_credential().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_stored_credential_survives_lost_framework_session() {
    let browser = Browser::new(FakeBackend::new());
    let page = browser.open();
    page.framework
        .sign_in("google", &google("ana@example.com"))
        .await
        .unwrap();
    let mut page = browser.open();
    page.load().await;

    std::fs::remove_file(&browser.cookie_path).unwrap();

    let mut reloaded = browser.open();
    let identity = reloaded.load().await;
    assert_eq!(identity.state(), AuthState::DirectAuthenticated);
    assert_eq!(identity.user().unwrap().name, "Ana Lima");
    assert!(!identity.is_admin());
}

#[tokio::test]
async fn test_revoked_credential_is_discarded_on_reload() {
    let backend = FakeBackend::new();
    let browser = Browser::new(backend.clone());
    let page = browser.open();
    page.reconciler.observe_session(page.framework.status()).await;
    page.reconciler
        .login_direct("Ana Lima", "ana@example.com")
        .await
        .unwrap();
    assert_eq!(browser.stored_credential().as_deref(), Some("tok-1"));

    backend.revoke("tok-1");

    let mut reloaded = browser.open();
    let identity = reloaded.load().await;
    assert_eq!(identity.state(), AuthState::Unauthenticated);
    assert_eq!(identity.error(), Some("Failed to authenticate"));
    assert_eq!(browser.stored_credential(), None);

    let mut again = browser.open();
    let identity = again.load().await;
    assert_eq!(identity.state(), AuthState::Unauthenticated);
    assert_eq!(identity.error(), None);
}

#[tokio::test]
async fn test_rejected_sign_in_leaves_no_identity() {
    let backend = FakeBackend::new();
    backend.set_down(true);
    let browser = Browser::new(backend);
    let mut page = browser.open();

    let outcome = page
        .framework
        .sign_in("google", &google("ana@example.com"))
        .await
        .unwrap();
    let SignInOutcome::Rejected { redirect, .. } = outcome else {
        panic!("expected rejection");
    };
    assert_eq!(redirect, "/auth/error?error=AccessDenied");

    let identity = page.load().await;
    assert_eq!(identity.state(), AuthState::Unauthenticated);
    assert!(!browser.cookie_path.exists());
    assert_eq!(browser.stored_credential(), None);
}

#[tokio::test]
async fn test_sign_in_without_email_has_no_credential() {
    let browser = Browser::new(FakeBackend::new());
    let mut page = browser.open();

    let outcome = page
        .framework
        .sign_in("google", &ProviderAssertion::new("google-sub-2").with_name("Ana"))
        .await
        .unwrap();
    let SignInOutcome::SignedIn(session) = outcome else {
        panic!("expected a session");
    };
    assert_eq!(session.credential(), None);

    let identity = page.load().await;
    assert!(!identity.is_authenticated());
    assert_eq!(browser.stored_credential(), None);
}

#[tokio::test]
async fn test_logout_clears_both_sources() {
    let browser = Browser::new(FakeBackend::new());
    let page = browser.open();
    page.framework
        .sign_in("google", &google("ana@example.com"))
        .await
        .unwrap();
    let mut page = browser.open();
    assert!(page.load().await.is_authenticated());

    let outcome = page.context.logout().await;
    assert!(outcome.framework_cleared);
    assert_eq!(outcome.redirect, "/");
    assert!(!page.context.is_authenticated());
    assert!(!browser.cookie_path.exists());
    assert_eq!(browser.stored_credential(), None);

    let mut reloaded = browser.open();
    assert_eq!(reloaded.load().await.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_unreachable_backend_discards_stored_credential() {
    let backend = FakeBackend::new();
    let browser = Browser::new(backend.clone());
    let mut page = browser.open();
    page.load().await;
    page.reconciler
        .login_direct("Ana Lima", "ana@example.com")
        .await
        .unwrap();

    backend.set_down(true);
    let mut reloaded = browser.open();
    let identity = reloaded.load().await;
    assert_eq!(identity.state(), AuthState::Unauthenticated);
    assert_eq!(browser.stored_credential(), None);
}
