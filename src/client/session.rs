//! Session Controller
//!
//! Reacts to identity-provider state transitions and exposes the current
//! session to consumers through a watch channel. Exactly one session is
//! live per client process.
//!
//! # State machine
//!
//! - Anonymous -> Authenticating: user-initiated sign-in.
//! - Authenticating -> Authenticated: provider resolved a valid identity;
//!   the credential store is populated and provisioning is fired
//!   best-effort (its failure is logged, never blocks the transition).
//! - Authenticating -> Error: provider rejected or threw; the failure is
//!   converted to `Error` status here, never propagated as a panic.
//! - Authenticated -> Anonymous: explicit sign-out, clearing the credential
//!   store before the provider's own sign-out resolves.
//! - any -> Anonymous: the provider emitted a `SignedOut` event (session
//!   revoked externally); local credential state is reconciled.

use std::sync::Arc;

use tokio::sync::watch;

use crate::client::credentials::CredentialStore;
use crate::client::gateway::ResourceGateway;
use crate::client::provider::{Identity, IdentityProvider, ProviderEvent};

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

/// Snapshot of the current session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub status: SessionStatus,
    /// The signed-in identity, present only when Authenticated
    pub identity: Option<Identity>,
    /// Last sign-in failure, present only in the Error state
    pub error: Option<String>,
}

impl SessionState {
    fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            identity: None,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

/// The per-process session controller
pub struct SessionController {
    provider: Arc<dyn IdentityProvider>,
    credentials: Arc<CredentialStore>,
    gateway: Arc<ResourceGateway>,
    state: watch::Sender<SessionState>,
}

impl SessionController {
    /// Create the controller and start watching provider events
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        credentials: Arc<CredentialStore>,
        gateway: Arc<ResourceGateway>,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(SessionState::anonymous());
        let controller = Arc::new(Self {
            provider,
            credentials,
            gateway,
            state,
        });
        controller.spawn_event_watcher();
        controller
    }

    /// Subscribe to session state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current session snapshot
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Sign in with email and password
    ///
    /// Returns the resulting session state; provider failures land in the
    /// `Error` status rather than propagating.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionState {
        self.state.send_replace(SessionState {
            status: SessionStatus::Authenticating,
            identity: None,
            error: None,
        });

        let session = match self.provider.sign_in(email, password).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                self.state.send_replace(SessionState {
                    status: SessionStatus::Error,
                    identity: None,
                    error: Some(e.to_string()),
                });
                return self.state();
            }
        };

        self.credentials.install(session.credential).await;
        self.state.send_replace(SessionState {
            status: SessionStatus::Authenticated,
            identity: Some(session.identity),
            error: None,
        });

        // Provisioning is best-effort: the record is upserted lazily on the
        // next authenticated call if this one fails.
        if let Err(e) = self.gateway.create_user().await {
            tracing::error!("User provisioning failed: {}", e);
        }

        self.state()
    }

    /// Sign out
    ///
    /// The credential store is empty before the provider's own sign-out
    /// call resolves, so no stale credential can be reused in the gap.
    pub async fn sign_out(&self) {
        self.credentials.clear().await;
        self.state.send_replace(SessionState::anonymous());

        if let Err(e) = self.provider.sign_out().await {
            tracing::warn!("Provider sign-out failed: {}", e);
        }
    }

    /// Watch for asynchronous provider events (external revocation)
    fn spawn_event_watcher(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        let mut events = self.provider.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(ProviderEvent::SignedOut) => {
                        if controller.state.borrow().status != SessionStatus::Anonymous {
                            tracing::info!("Provider signed out; reconciling to Anonymous");
                            controller.credentials.clear().await;
                            controller.state.send_replace(SessionState::anonymous());
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}
