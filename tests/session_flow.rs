//! Session controller and reconciler integration tests
//!
//! Drives the sign-in/sign-out state machine with a scripted identity
//! provider and a mock HTTP server, and checks that the local stores fail
//! fast outside an authenticated session.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{empty_store, gateway_for, store_with_token, user_record_json, MockProvider};
use mindmate::client::session::{SessionController, SessionStatus};
use mindmate::client::stores::{DiaryStore, GratitudeStore};
use mindmate::client::ClientError;

async fn wait_for_status(
    receiver: &mut tokio::sync::watch::Receiver<mindmate::client::SessionState>,
    status: SessionStatus,
) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if receiver.borrow().status == status {
                return;
            }
            receiver.changed().await.unwrap();
        }
    })
    .await
    .unwrap_or_else(|_| panic!("session never reached {:?}", status));
}

#[tokio::test]
async fn test_sign_in_reaches_authenticated_and_provisions() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store.clone());

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .expect(1)
        .mount(&server)
        .await;

    let controller = SessionController::new(provider, store.clone(), gateway);
    let state = controller.sign_in("test@example.com", "hunter22").await;

    assert_eq!(state.status, SessionStatus::Authenticated);
    assert_eq!(state.identity.unwrap().subject, "subject-1");
    assert!(store.current().await.is_some());
}

#[tokio::test]
async fn test_rejected_sign_in_lands_in_error_state() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    provider.fail_sign_in();
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store.clone());

    let controller = SessionController::new(provider, store.clone(), gateway);
    let state = controller.sign_in("test@example.com", "wrong").await;

    assert_eq!(state.status, SessionStatus::Error);
    assert!(state.error.unwrap().contains("rejected"));
    assert!(store.current().await.is_none());
}

#[tokio::test]
async fn test_provisioning_failure_does_not_block_authentication() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store.clone());

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Server error"
        })))
        .mount(&server)
        .await;

    let controller = SessionController::new(provider, store, gateway);
    let state = controller.sign_in("test@example.com", "hunter22").await;

    assert_eq!(state.status, SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_sign_out_clears_credentials_and_returns_to_anonymous() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store.clone());

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .mount(&server)
        .await;

    let controller = SessionController::new(provider, store.clone(), gateway);
    controller.sign_in("test@example.com", "hunter22").await;
    assert!(store.current().await.is_some());

    controller.sign_out().await;

    assert_eq!(controller.state().status, SessionStatus::Anonymous);
    assert!(store.current().await.is_none());
}

#[tokio::test]
async fn test_external_revocation_reconciles_to_anonymous() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store.clone());

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .mount(&server)
        .await;

    let controller = SessionController::new(provider.clone(), store.clone(), gateway);
    let mut session = controller.subscribe();
    controller.sign_in("test@example.com", "hunter22").await;
    assert_eq!(controller.state().status, SessionStatus::Authenticated);

    provider.revoke();

    wait_for_status(&mut session, SessionStatus::Anonymous).await;
    assert!(store.current().await.is_none());
}

#[tokio::test]
async fn test_repeated_refresh_is_idempotent() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store.clone());

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/diary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "1730000000000",
            "content": "a calm evening",
            "date": "2025-01-02T19:00:00Z",
            "emotions": [{"type": "calm", "intensity": 6}],
            "isPublic": false
        }])))
        .mount(&server)
        .await;

    let controller = SessionController::new(provider, store, gateway.clone());
    controller.sign_in("test@example.com", "hunter22").await;

    let diary = DiaryStore::new(gateway, controller.subscribe());
    diary.refresh().await.unwrap();
    let first = diary.items().await;
    diary.refresh().await.unwrap();
    let second = diary.items().await;

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert!(!diary.loading().await);
    assert!(diary.error().await.is_none());
}

#[tokio::test]
async fn test_stores_fail_fast_when_anonymous() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store.clone());

    // Any network traffic here would be a gating failure.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let controller = SessionController::new(provider, store, gateway.clone());
    let session = controller.subscribe();

    let diary = DiaryStore::new(gateway.clone(), session.clone());
    let gratitude = GratitudeStore::new(gateway, session);

    assert!(matches!(
        diary.refresh().await.unwrap_err(),
        ClientError::NotAuthenticated
    ));
    assert!(matches!(
        gratitude.add("sunny day").await.unwrap_err(),
        ClientError::NotAuthenticated
    ));
    assert!(diary.items().await.is_empty());
}
