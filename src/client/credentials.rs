//! Credential Store
//!
//! Holds the current bearer credential and refreshes it on demand through
//! the identity provider. Provider failures are logged and surface as
//! `None`; nothing at this boundary panics or returns an error type.
//!
//! # Concurrency
//!
//! The store is the only shared mutable resource in the client core. The
//! credential is replaced atomically under an `RwLock`, and refreshes are
//! single-flight: concurrent callers that both observe an expired token
//! serialize on an async mutex, and the second one returns the first one's
//! result instead of issuing a duplicate refresh.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::client::provider::{Credential, IdentityProvider};

/// A refresh completed within this window satisfies a concurrent forced
/// request without another round trip.
const FRESH_WINDOW_SECS: i64 = 5;

/// Durable key-value slot for the latest credential
///
/// A JSON file; written on install/refresh, removed on sign-out, loaded on
/// startup so a reload can reuse a still-valid session.
#[derive(Debug, Clone)]
pub struct TokenSlot {
    path: PathBuf,
}

impl TokenSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the platform data directory
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("mindmate").join("credentials.json")))
    }

    /// Load the persisted credential, if any
    pub fn load(&self) -> Option<Credential> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!("Ignoring unreadable credential slot: {}", e);
                None
            }
        }
    }

    /// Persist the credential, replacing any previous one
    pub fn save(&self, credential: &Credential) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let bytes = serde_json::to_vec(credential)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            // Write-then-rename so a crash never leaves a torn slot.
            let tmp = self.path.with_extension("tmp");
            std::fs::write(&tmp, bytes)?;
            std::fs::rename(&tmp, &self.path)
        };
        if let Err(e) = write() {
            tracing::warn!("Failed to persist credential slot: {}", e);
        }
    }

    /// Remove the persisted credential
    pub fn remove(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove credential slot: {}", e);
            }
        }
    }
}

/// The shared credential store
pub struct CredentialStore {
    provider: Arc<dyn IdentityProvider>,
    current: RwLock<Option<Credential>>,
    refresh_gate: Mutex<()>,
    slot: Option<TokenSlot>,
}

impl CredentialStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            slot: None,
        }
    }

    /// Create a store that persists credentials to a durable slot
    pub fn with_slot(provider: Arc<dyn IdentityProvider>, slot: TokenSlot) -> Self {
        Self {
            provider,
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            slot: Some(slot),
        }
    }

    /// Install a credential obtained out of band (sign-in)
    pub async fn install(&self, credential: Credential) {
        if let Some(slot) = &self.slot {
            slot.save(&credential);
        }
        *self.current.write().await = Some(credential);
    }

    /// Reload a persisted credential from the durable slot
    ///
    /// Returns true if a credential was restored.
    pub async fn restore(&self) -> bool {
        let Some(slot) = &self.slot else {
            return false;
        };
        match slot.load() {
            Some(credential) => {
                *self.current.write().await = Some(credential);
                true
            }
            None => false,
        }
    }

    /// Current credential, if any (valid or not)
    pub async fn current(&self) -> Option<Credential> {
        self.current.read().await.clone()
    }

    /// Get a bearer token
    ///
    /// Returns the cached token when it is valid and `force_refresh` is
    /// false; otherwise asks the provider for a fresh one. Returns `None`
    /// when no credential can be obtained; never an error.
    pub async fn token(&self, force_refresh: bool) -> Option<String> {
        if !force_refresh {
            if let Some(credential) = self.current.read().await.as_ref() {
                if credential.is_valid() {
                    return Some(credential.token.clone());
                }
            }
        }
        self.refresh().await.map(|credential| credential.token)
    }

    /// Clear the credential (sign-out)
    ///
    /// The in-memory credential and the durable slot are both gone by the
    /// time this resolves; in-flight requests that already read the token
    /// keep their copy, new ones see nothing.
    pub async fn clear(&self) {
        *self.current.write().await = None;
        if let Some(slot) = &self.slot {
            slot.remove();
        }
    }

    /// Get a bearer token after the server rejected `rejected`
    ///
    /// Skips the fresh-window shortcut for the rejected token, so the
    /// provider is actually asked for a new credential instead of the
    /// just-rejected one being handed back from cache.
    pub async fn token_after_rejection(&self, rejected: &str) -> Option<String> {
        self.refresh_unless(Some(rejected))
            .await
            .map(|credential| credential.token)
    }

    /// Single-flight refresh through the identity provider
    async fn refresh(&self) -> Option<Credential> {
        self.refresh_unless(None).await
    }

    async fn refresh_unless(&self, rejected: Option<&str>) -> Option<Credential> {
        let _flight = self.refresh_gate.lock().await;

        // Another flight may have refreshed while we waited for the gate.
        // A token the server already rejected never satisfies the caller,
        // however recently it was minted.
        if let Some(credential) = self.current.read().await.as_ref() {
            let age = Utc::now() - credential.issued_at;
            let usable = rejected != Some(credential.token.as_str());
            if usable && credential.is_valid() && age < Duration::seconds(FRESH_WINDOW_SECS) {
                return Some(credential.clone());
            }
        }

        let refresh_token = match self.current.read().await.as_ref() {
            Some(credential) => credential.refresh_token.clone(),
            None => {
                tracing::debug!("No credential to refresh");
                return None;
            }
        };

        match self.provider.refresh(&refresh_token).await {
            Ok(credential) => {
                if let Some(slot) = &self.slot {
                    slot.save(&credential);
                }
                *self.current.write().await = Some(credential.clone());
                Some(credential)
            }
            Err(e) => {
                tracing::error!("Credential refresh failed: {}", e);
                None
            }
        }
    }
}
