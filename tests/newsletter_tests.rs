//! Integration tests for the newsletter flow.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use showcase_storefront::newsletter::{
    FileEmailStore, FormState, MemoryEmailStore, NewsletterError, NewsletterForm,
    NewsletterService, NoticeKind, PendingEmailStore, StatusPoller, MISSING_FIELDS_MESSAGE,
};
use showcase_storefront::{ApiBaseUrl, StorefrontApi, StorefrontConfig};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> StorefrontApi {
    let config = StorefrontConfig::builder()
        .api_base_url(ApiBaseUrl::new(format!("{}/api/v1", server.uri())).unwrap())
        .retry_base_delay(Duration::from_millis(5))
        .build()
        .unwrap();
    StorefrontApi::new(&config).unwrap()
}

fn service_with(server: &MockServer, store: Arc<dyn PendingEmailStore>) -> NewsletterService {
    NewsletterService::new(api_for(server), store, "page")
}

async fn mount_status(server: &MockServer, email: &str, status: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/newsletter/subscribers/status/"))
        .and(query_param("email", email))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .mount(server)
        .await;
}

// ============================================================================
// Subscription
// ============================================================================

#[tokio::test]
async fn test_submit_without_consent_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_with(&server, Arc::new(MemoryEmailStore::new()));
    let mut form = NewsletterForm::new();
    form.apply_snapshot(&Default::default());
    form.set_email("visiteur@example.com");

    let notice = form.submit(&service).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.description, MISSING_FIELDS_MESSAGE);
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test]
async fn test_accepted_subscription_is_remembered_in_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/newsletter/subscribers/"))
        .and(body_json(json!({"email": "visiteur@example.com", "source": "page"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Vérifiez votre email"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileEmailStore::new(dir.path().join("storage.json")));
    let service = service_with(&server, store.clone());

    let mut form = NewsletterForm::new();
    form.apply_snapshot(&Default::default());
    form.set_email(" visiteur@example.com ");
    form.set_consent(true);

    let notice = form.submit(&service).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.description, "Vérifiez votre email");
    assert_eq!(form.state(), FormState::Success);
    assert!(!form.consent());
    assert_eq!(store.load().unwrap().as_deref(), Some("visiteur@example.com"));

    // A second submit is ignored while waiting for confirmation.
    assert!(form.submit(&service).await.is_none());
}

#[tokio::test]
async fn test_rejected_subscription_is_not_remembered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/newsletter/subscribers/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["Cet email est déjà inscrit."]
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryEmailStore::new());
    let service = service_with(&server, store.clone());

    let outcome = service.subscribe("dup@example.com", true).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(store.load().unwrap(), None);
}

// ============================================================================
// Confirmation
// ============================================================================

#[tokio::test]
async fn test_confirm_clears_pending_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/newsletter/subscribers/confirm/"))
        .and(body_json(json!({"token": "tok-123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Merci, c'est confirmé"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryEmailStore::with_email("visiteur@example.com"));
    let service = service_with(&server, store.clone());

    let message = service.confirm("tok-123").await.unwrap();
    assert_eq!(message, "Merci, c'est confirmé");
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_confirm_with_empty_token_is_local_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryEmailStore::with_email("visiteur@example.com"));
    let service = service_with(&server, store.clone());

    let error = service.confirm("").await.unwrap_err();
    assert!(matches!(error, NewsletterError::Validation { .. }));
    assert_eq!(store.load().unwrap().as_deref(), Some("visiteur@example.com"));
}

#[tokio::test]
async fn test_confirm_with_bad_token_keeps_pending_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/newsletter/subscribers/confirm/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Token invalide ou expiré"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryEmailStore::with_email("visiteur@example.com"));
    let service = service_with(&server, store.clone());

    let error = service.confirm("perime").await.unwrap_err();
    assert_eq!(error.user_message(), "Token invalide ou expiré");
    assert!(store.load().unwrap().is_some());
}

// ============================================================================
// Status polling
// ============================================================================

#[tokio::test]
async fn test_poller_without_pending_email_publishes_empty_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_with(&server, Arc::new(MemoryEmailStore::new()));
    let mut poller = StatusPoller::spawn(service, Duration::from_secs(60));

    let snapshot = poller.next_snapshot().await.unwrap();
    assert_eq!(snapshot.email, None);
    assert_eq!(snapshot.status, None);

    let mut form = NewsletterForm::new();
    form.apply_snapshot(&snapshot);
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test]
async fn test_poller_reports_pending_then_confirmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/newsletter/subscribers/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exists": true, "subscribed": true, "confirmed": false
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_status(
        &server,
        "visiteur@example.com",
        json!({"exists": true, "subscribed": true, "confirmed": true}),
    )
    .await;

    let store = Arc::new(MemoryEmailStore::with_email("visiteur@example.com"));
    let service = service_with(&server, store);
    let mut poller = StatusPoller::spawn(service, Duration::from_secs(60));
    let mut form = NewsletterForm::new();

    let first = poller.next_snapshot().await.unwrap();
    form.apply_snapshot(&first);
    assert_eq!(form.state(), FormState::Success);
    assert_eq!(form.email(), "visiteur@example.com");

    // Visibility change triggers a check long before the next tick.
    poller.notify_visible();
    let second = tokio::time::timeout(Duration::from_secs(5), poller.next_snapshot())
        .await
        .unwrap()
        .unwrap();
    form.apply_snapshot(&second);
    assert!(form.is_hidden());
}

#[tokio::test]
async fn test_poller_errors_are_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/newsletter/subscribers/status/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryEmailStore::with_email("visiteur@example.com"));
    let mut poller = StatusPoller::spawn(service_with(&server, store), Duration::from_millis(20));

    let snapshot = poller.next_snapshot().await.unwrap();
    assert_eq!(snapshot.email.as_deref(), Some("visiteur@example.com"));
    assert_eq!(snapshot.status, None);

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(!poller.is_stopped());
}

#[tokio::test]
async fn test_stopped_poller_ends_its_task() {
    let server = MockServer::start().await;
    let service = service_with(&server, Arc::new(MemoryEmailStore::new()));
    let poller = StatusPoller::spawn(service, Duration::from_millis(10));

    poller.stop();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(poller.is_stopped());
}
