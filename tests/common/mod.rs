//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::broadcast;

use mindmate::client::provider::{
    Credential, Identity, IdentityProvider, ProviderError, ProviderEvent, ProviderSession,
};
use mindmate::client::{ApiClient, Config, CredentialStore, ResourceGateway};

/// Scripted identity provider
///
/// Issues sequentially numbered tokens ("token-1", "token-2", ...) and
/// counts refresh calls. By default issued credentials are backdated past
/// the credential store's fresh window so every forced refresh reaches the
/// provider; `issue_fresh_credentials` switches to now-stamped credentials
/// like the real provider mints.
pub struct MockProvider {
    refreshes: AtomicUsize,
    fail_sign_in: AtomicBool,
    fail_refresh: AtomicBool,
    backdate: AtomicBool,
    events: broadcast::Sender<ProviderEvent>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            refreshes: AtomicUsize::new(0),
            fail_sign_in: AtomicBool::new(false),
            fail_refresh: AtomicBool::new(false),
            backdate: AtomicBool::new(true),
            events: broadcast::channel(8).0,
        }
    }

    /// Stamp issued credentials with the current time, like the real
    /// provider, instead of backdating them past the fresh window.
    pub fn issue_fresh_credentials(&self) {
        self.backdate.store(false, Ordering::SeqCst);
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn fail_sign_in(&self) {
        self.fail_sign_in.store(true, Ordering::SeqCst);
    }

    pub fn fail_refresh(&self) {
        self.fail_refresh.store(true, Ordering::SeqCst);
    }

    /// Emit an external sign-out event
    pub fn revoke(&self) {
        let _ = self.events.send(ProviderEvent::SignedOut);
    }

    fn numbered_credential(n: usize, backdate: bool) -> Credential {
        let now = Utc::now();
        // Backdating puts the credential past the store's fresh window so
        // every forced refresh reaches the provider.
        let issued_at = if backdate { now - Duration::seconds(30) } else { now };
        Credential {
            token: format!("token-{}", n),
            issued_at,
            expires_at: now + Duration::seconds(900),
            refresh_token: "refresh-token".to_string(),
        }
    }

    fn mint(&self, n: usize) -> Credential {
        Self::numbered_credential(n, self.backdate.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<ProviderSession, ProviderError> {
        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(ProviderError::Rejected("invalid credentials".to_string()));
        }
        Ok(ProviderSession {
            identity: Identity {
                subject: "subject-1".to_string(),
                email: email.to_string(),
                display_name: Some("Test User".to_string()),
            },
            credential: self.mint(1),
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<Credential, ProviderError> {
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(ProviderError::Rejected("refresh rejected".to_string()));
        }
        let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 2;
        Ok(self.mint(n))
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

/// Build a credential store pre-loaded with `token-1`
pub async fn store_with_token(provider: Arc<MockProvider>) -> Arc<CredentialStore> {
    let store = Arc::new(CredentialStore::new(provider));
    store.install(MockProvider::numbered_credential(1, true)).await;
    store
}

/// Build an empty credential store
pub fn empty_store(provider: Arc<MockProvider>) -> Arc<CredentialStore> {
    Arc::new(CredentialStore::new(provider))
}

/// Build a gateway pointed at a test server
pub fn gateway_for(server_url: &str, credentials: Arc<CredentialStore>) -> Arc<ResourceGateway> {
    let config = Config::with_server_url(server_url);
    Arc::new(ResourceGateway::new(ApiClient::new(config, credentials)))
}

/// A user record body as the server returns it
pub fn user_record_json() -> serde_json::Value {
    serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000001",
        "subjectId": "subject-1",
        "email": "test@example.com",
        "displayName": "Test User",
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}
