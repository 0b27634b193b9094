//! Identity Provider Seam
//!
//! The identity provider owns token issuance; the client never inspects a
//! credential beyond its expiry. The trait exists so the session controller
//! and credential store can be exercised against a scripted provider in
//! tests, with [`HttpIdentityProvider`] talking to the real auth endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::backend::auth::handlers::types::{
    AuthResponse, LoginRequest, RefreshRequest, RefreshResponse,
};
use crate::client::config::Config;

/// Clock-skew allowance when judging whether a credential is still valid.
const EXPIRY_LEEWAY_SECS: i64 = 30;

/// An authenticated identity as the provider reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque external subject id
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// A time-limited bearer credential
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// The bearer token attached to requests
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Long-lived token used to obtain fresh bearer tokens
    pub refresh_token: String,
}

impl Credential {
    /// Whether the token can still be attached to a request.
    ///
    /// Applies a small leeway so a token about to expire is treated as
    /// already expired rather than racing the server's clock.
    pub fn is_valid(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECS) < self.expires_at
    }
}

/// A completed sign-in: who the user is plus their first credential
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub identity: Identity,
    pub credential: Credential,
}

/// Events the provider emits asynchronously
///
/// `SignedOut` covers external revocation: the controller must reconcile to
/// Anonymous even without a code-path-initiated sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    SignedOut,
}

/// Identity-provider failures
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the sign-in or refresh
    #[error("sign-in rejected: {0}")]
    Rejected(String),

    /// Transport-level failure reaching the provider
    #[error("provider unreachable: {0}")]
    Network(String),
}

/// The identity-provider contract
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve credentials for an email/password pair
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError>;

    /// Exchange a refresh token for a fresh bearer credential
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, ProviderError>;

    /// End the provider-side session
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Subscribe to asynchronous provider events
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}

/// Identity provider backed by the REST auth endpoints
pub struct HttpIdentityProvider {
    config: Config,
    client: Client,
    events: broadcast::Sender<ProviderEvent>,
}

impl HttpIdentityProvider {
    pub fn new(config: Config) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            config,
            client: Client::new(),
            events,
        }
    }

    fn credential_from_parts(
        token: String,
        refresh_token: String,
        expires_in: i64,
    ) -> Credential {
        let now = Utc::now();
        Credential {
            token,
            issued_at: now,
            expires_at: now + Duration::seconds(expires_in),
            refresh_token,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError> {
        let url = self.config.api_url("/api/auth/login");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ProviderError::Rejected(format!("{} - {}", status, text)));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to parse response: {}", e)))?;

        Ok(ProviderSession {
            identity: Identity {
                subject: auth.user.subject_id.clone(),
                email: auth.user.email.clone(),
                display_name: auth.user.display_name.clone(),
            },
            credential: Self::credential_from_parts(
                auth.token,
                auth.refresh_token,
                auth.expires_in,
            ),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credential, ProviderError> {
        let url = self.config.api_url("/api/auth/refresh");
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Refresh token itself is no longer accepted: the session is
            // gone, tell subscribers so they reconcile to Anonymous.
            let _ = self.events.send(ProviderEvent::SignedOut);
            return Err(ProviderError::Rejected("refresh token rejected".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ProviderError::Rejected(format!("{} - {}", status, text)));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to parse response: {}", e)))?;

        Ok(Self::credential_from_parts(
            refreshed.token,
            refresh_token.to_string(),
            refreshed.expires_in,
        ))
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        // Tokens are stateless server-side; signing out is a local act.
        let _ = self.events.send(ProviderEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}
