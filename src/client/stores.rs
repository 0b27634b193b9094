//! Local State Reconcilers
//!
//! Holds list state per resource kind and merges server responses into
//! presentation-ready state. The server is authoritative: `refresh`
//! replaces the local list wholesale, and appends are awaited before local
//! state changes, so no separate optimistic-then-reconcile step exists.
//!
//! Mutations and fetches gated on the session: anything attempted outside
//! an Authenticated session fails fast with `NotAuthenticated` before any
//! network call, never a silent no-op.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::client::bot;
use crate::client::error::ClientError;
use crate::client::gateway::ResourceGateway;
use crate::client::session::SessionState;
use crate::shared::gratitude::GRATITUDE_MAX_LEN;
use crate::shared::{
    ChatMessage, DiaryEntry, GratitudeEntry, NewChatMessage, NewDiaryEntry, NewGratitudeEntry,
    Sender, SharedError,
};

/// List state shared by every resource kind
#[derive(Debug, Clone)]
struct ResourceState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

macro_rules! resource_accessors {
    ($item:ty) => {
        /// Current list snapshot
        pub async fn items(&self) -> Vec<$item> {
            self.state.read().await.items.clone()
        }

        /// Whether a refresh is in flight
        pub async fn loading(&self) -> bool {
            self.state.read().await.loading
        }

        /// Latest error surfaced to the presentation layer
        pub async fn error(&self) -> Option<String> {
            self.state.read().await.error.clone()
        }
    };
}

fn ensure_authenticated(session: &watch::Receiver<SessionState>) -> Result<(), ClientError> {
    if session.borrow().is_authenticated() {
        Ok(())
    } else {
        Err(ClientError::NotAuthenticated)
    }
}

fn validate_content(content: &str) -> Result<(), ClientError> {
    if content.trim().is_empty() {
        return Err(SharedError::validation("content", "content cannot be empty").into());
    }
    Ok(())
}

/// Diary entry reconciler
pub struct DiaryStore {
    gateway: Arc<ResourceGateway>,
    session: watch::Receiver<SessionState>,
    state: RwLock<ResourceState<DiaryEntry>>,
}

impl DiaryStore {
    pub fn new(gateway: Arc<ResourceGateway>, session: watch::Receiver<SessionState>) -> Self {
        Self {
            gateway,
            session,
            state: RwLock::new(ResourceState::default()),
        }
    }

    resource_accessors!(DiaryEntry);

    /// Replace local state with the server's list
    pub async fn refresh(&self) -> Result<(), ClientError> {
        ensure_authenticated(&self.session)?;
        self.state.write().await.loading = true;

        let result = self.gateway.diary_entries().await;
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(entries) => {
                state.items = entries;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Create an entry and merge the server's copy into local state
    ///
    /// Intensities are clamped before the payload leaves the client; the
    /// round trip is awaited, so the entry that lands locally is the
    /// server-assigned one.
    pub async fn add(&self, entry: NewDiaryEntry) -> Result<DiaryEntry, ClientError> {
        ensure_authenticated(&self.session)?;
        validate_content(&entry.content)?;

        let entry = NewDiaryEntry::new(entry.content, entry.emotions, entry.is_public);
        let result = self.gateway.add_diary_entry(&entry).await;
        let mut state = self.state.write().await;
        match result {
            Ok(created) => {
                // Lists are newest-first; the created entry goes on top.
                state.items.insert(0, created.clone());
                state.error = None;
                Ok(created)
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Edit an entry's content in local state only
    ///
    /// Entries are immutable server-side; this never persists. Returns
    /// false when the id is unknown.
    pub async fn edit_local(&self, id: &str, content: impl Into<String>) -> bool {
        let mut state = self.state.write().await;
        match state.items.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.content = content.into();
                true
            }
            None => false,
        }
    }
}

/// Gratitude wall reconciler
pub struct GratitudeStore {
    gateway: Arc<ResourceGateway>,
    session: watch::Receiver<SessionState>,
    state: RwLock<ResourceState<GratitudeEntry>>,
}

impl GratitudeStore {
    pub fn new(gateway: Arc<ResourceGateway>, session: watch::Receiver<SessionState>) -> Self {
        Self {
            gateway,
            session,
            state: RwLock::new(ResourceState::default()),
        }
    }

    resource_accessors!(GratitudeEntry);

    pub async fn refresh(&self) -> Result<(), ClientError> {
        ensure_authenticated(&self.session)?;
        self.state.write().await.loading = true;

        let result = self.gateway.gratitude_entries().await;
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(entries) => {
                state.items = entries;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Create an entry; the server returns the full updated list, which
    /// replaces local state directly.
    pub async fn add(&self, content: impl Into<String>) -> Result<(), ClientError> {
        ensure_authenticated(&self.session)?;
        let content = content.into();
        validate_content(&content)?;
        if content.chars().count() > GRATITUDE_MAX_LEN {
            return Err(SharedError::validation(
                "content",
                format!("gratitude entries are limited to {} characters", GRATITUDE_MAX_LEN),
            )
            .into());
        }

        let result = self
            .gateway
            .add_gratitude_entry(&NewGratitudeEntry { content })
            .await;
        let mut state = self.state.write().await;
        match result {
            Ok(entries) => {
                state.items = entries;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

/// Companion chat reconciler
pub struct ChatStore {
    gateway: Arc<ResourceGateway>,
    session: watch::Receiver<SessionState>,
    state: RwLock<ResourceState<ChatMessage>>,
}

impl ChatStore {
    pub fn new(gateway: Arc<ResourceGateway>, session: watch::Receiver<SessionState>) -> Self {
        Self {
            gateway,
            session,
            state: RwLock::new(ResourceState::default()),
        }
    }

    resource_accessors!(ChatMessage);

    pub async fn refresh(&self) -> Result<(), ClientError> {
        ensure_authenticated(&self.session)?;
        self.state.write().await.loading = true;

        let result = self.gateway.chat_history().await;
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(messages) => {
                state.items = messages;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Send a user message and the locally generated bot reply
    ///
    /// Both travel through the same endpoint; the bot reply is persisted
    /// only because it is explicitly posted here. The server's full list
    /// after the bot message replaces local state.
    pub async fn send(&self, content: impl Into<String>) -> Result<(), ClientError> {
        ensure_authenticated(&self.session)?;
        let content = content.into();
        validate_content(&content)?;

        let reply = bot::generate_response(&content);

        let user_message = NewChatMessage {
            sender: Sender::User,
            content,
        };
        let posted = self.gateway.add_chat_message(&user_message).await;
        {
            let mut state = self.state.write().await;
            match &posted {
                Ok(messages) => {
                    state.items = messages.clone();
                    state.error = None;
                }
                Err(e) => state.error = Some(e.user_message()),
            }
        }
        posted?;

        let bot_message = NewChatMessage {
            sender: Sender::Bot,
            content: reply.to_string(),
        };
        let result = self.gateway.add_chat_message(&bot_message).await;
        let mut state = self.state.write().await;
        match result {
            Ok(messages) => {
                state.items = messages;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_rejects_blank() {
        assert!(validate_content("   ").is_err());
        assert!(validate_content("fine").is_ok());
    }

    #[test]
    fn test_resource_state_default() {
        let state: ResourceState<DiaryEntry> = ResourceState::default();
        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }
}
