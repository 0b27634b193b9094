//! Client Module
//!
//! The session & data-synchronization core: everything needed to keep
//! client-held journal state consistent with the remote authoritative store
//! under an expiring-credential model.
//!
//! # Layering (leaf to root)
//!
//! - [`credentials`] - bearer credential lifecycle with single-flight refresh
//! - [`http`] - authenticated request client with retry-once-on-401
//! - [`gateway`] - typed per-resource operations over the request client
//! - [`session`] - the sign-in/sign-out state machine consumers subscribe to
//! - [`stores`] - local list state reconciled against server responses
//!
//! Supporting pieces: [`provider`] abstracts the identity provider behind a
//! trait seam, [`emotion`] and [`bot`] carry the keyword lookup logic the
//! journaling UI relies on, and [`debounce`] provides the instance-scoped
//! debouncer used for draft analysis.

pub mod bot;
pub mod config;
pub mod credentials;
pub mod debounce;
pub mod emotion;
pub mod error;
pub mod gateway;
pub mod http;
pub mod provider;
pub mod session;
pub mod stores;

pub use config::Config;
pub use credentials::{CredentialStore, TokenSlot};
pub use error::ClientError;
pub use gateway::ResourceGateway;
pub use http::ApiClient;
pub use provider::{Credential, Identity, IdentityProvider, ProviderError, ProviderEvent};
pub use session::{SessionController, SessionState, SessionStatus};
pub use stores::{ChatStore, DiaryStore, GratitudeStore};
