//! Authenticated request client and gateway integration tests
//!
//! Exercises credential acquisition, the single 401 retry, error
//! normalization, and the per-resource response shapes against a mock
//! HTTP server.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{empty_store, gateway_for, store_with_token, user_record_json, MockProvider};
use mindmate::client::ClientError;
use mindmate::shared::{Emotion, EmotionKind, NewDiaryEntry};

#[tokio::test]
async fn test_request_carries_freshly_refreshed_bearer_token() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    // The stored credential is past the fresh window, so the pre-request
    // forced refresh mints token-2.
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = gateway.current_user().await.unwrap();
    assert_eq!(user.subject_id, "subject-1");
    assert_eq!(provider.refresh_count(), 1);
}

#[tokio::test]
async fn test_falls_back_to_cached_token_when_refresh_fails() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    provider.fail_refresh();
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = gateway.current_user().await.unwrap();
    assert_eq!(user.email, "test@example.com");
}

#[tokio::test]
async fn test_retries_exactly_once_on_401() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    // First request (token-2) is rejected once; the retry arrives with the
    // next refreshed token.
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer token-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = gateway.current_user().await.unwrap();
    assert_eq!(user.subject_id, "subject-1");
    assert_eq!(provider.refresh_count(), 2);
}

#[tokio::test]
async fn test_401_retry_carries_new_token_despite_fresh_window() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    // Credentials are stamped with the current time, like the real
    // provider, so the pre-request refresh is still inside the store's
    // fresh window when the 401 arrives.
    provider.issue_fresh_credentials();
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer token-2"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer token-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = gateway.current_user().await.unwrap();
    assert_eq!(user.subject_id, "subject-1");
    // The rejected token was never re-sent: one refresh before the
    // request, one real refresh after the 401.
    assert_eq!(provider.refresh_count(), 2);
}

#[tokio::test]
async fn test_persistent_401_fails_after_single_retry() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "Unauthorized"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let error = gateway.current_user().await.unwrap_err();
    match error {
        ClientError::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body.error, "Unauthorized");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    // One refresh before the request, one after the 401. Never more.
    assert_eq!(provider.refresh_count(), 2);
}

#[tokio::test]
async fn test_no_credential_fails_before_any_request() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = empty_store(provider.clone());
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = gateway.current_user().await.unwrap_err();
    assert!(matches!(error, ClientError::Auth));
    assert_eq!(provider.refresh_count(), 0);
}

#[tokio::test]
async fn test_error_body_is_parsed_from_response() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("POST"))
        .and(path("/api/users/gratitude"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Validation failed",
            "message": "Entry content is required"
        })))
        .mount(&server)
        .await;

    let error = gateway
        .add_gratitude_entry(&mindmate::shared::NewGratitudeEntry {
            content: "x".to_string(),
        })
        .await
        .unwrap_err();
    match error {
        ClientError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body.message.as_deref(), Some("Entry content is required"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_error_body_degrades_to_status() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("GET"))
        .and(path("/api/users/diary"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let error = gateway.diary_entries().await.unwrap_err();
    match error {
        ClientError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body.error, "HTTP 500");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_diary_append_unwraps_created_entry() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("POST"))
        .and(path("/api/users/diary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "entry": {
                "id": "1730000000000",
                "content": "a calm evening",
                "date": "2025-01-02T19:00:00Z",
                "emotions": [{"type": "calm", "intensity": 6}],
                "isPublic": false
            }
        })))
        .mount(&server)
        .await;

    let entry = NewDiaryEntry::new(
        "a calm evening",
        vec![Emotion::new(EmotionKind::Calm, 6)],
        false,
    );
    let created = gateway.add_diary_entry(&entry).await.unwrap();
    assert_eq!(created.id, "1730000000000");
    assert_eq!(created.emotions[0].kind, EmotionKind::Calm);
}

#[tokio::test]
async fn test_gratitude_append_returns_full_list() {
    let server = MockServer::start().await;
    let provider = Arc::new(MockProvider::new());
    let store = store_with_token(provider.clone()).await;
    let gateway = gateway_for(&server.uri(), store);

    Mock::given(method("POST"))
        .and(path("/api/users/gratitude"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "2", "content": "new entry", "date": "2025-01-02T00:00:00Z"},
            {"id": "1", "content": "old entry", "date": "2025-01-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let entries = gateway
        .add_gratitude_entry(&mindmate::shared::NewGratitudeEntry {
            content: "new entry".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first.
    assert_eq!(entries[0].id, "2");
}
