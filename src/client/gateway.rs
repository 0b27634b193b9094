//! Remote Resource Gateway
//!
//! Typed operations per resource kind, one thin layer above the
//! authenticated request client: URL construction and JSON (de)serialization
//! only, no business logic. Date fields convert between wire strings and
//! `DateTime<Utc>` through serde on the way in and out.
//!
//! The add endpoints are asymmetric on the wire: diary returns the single
//! created entry (wrapped in `{success, entry}`), gratitude and chat return
//! the full updated collection. The gateway normalizes this by exposing the
//! shape explicitly in each operation's return type so the reconciler never
//! special-cases the wire format itself.

use serde::Deserialize;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::shared::{
    ChatMessage, DiaryEntry, GratitudeEntry, NewChatMessage, NewDiaryEntry, NewGratitudeEntry,
    UserRecord,
};

/// Wire shape of a successful diary append
#[derive(Debug, Deserialize)]
struct DiaryCreated {
    #[allow(dead_code)]
    success: bool,
    entry: DiaryEntry,
}

/// Typed REST operations over the authenticated request client
pub struct ResourceGateway {
    api: ApiClient,
}

impl ResourceGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Provision the user record (atomic find-or-create server-side)
    pub async fn create_user(&self) -> Result<UserRecord, ClientError> {
        self.api
            .post_json("/api/users", &serde_json::json!({}))
            .await
    }

    /// Fetch the current user record
    pub async fn current_user(&self) -> Result<UserRecord, ClientError> {
        self.api.get_json("/api/users/me").await
    }

    /// Fetch all diary entries, newest first
    pub async fn diary_entries(&self) -> Result<Vec<DiaryEntry>, ClientError> {
        self.api.get_json("/api/users/diary").await
    }

    /// Append a diary entry; the server returns the created entry only
    pub async fn add_diary_entry(&self, entry: &NewDiaryEntry) -> Result<DiaryEntry, ClientError> {
        let created: DiaryCreated = self.api.post_json("/api/users/diary", entry).await?;
        Ok(created.entry)
    }

    /// Fetch all gratitude entries, newest first
    pub async fn gratitude_entries(&self) -> Result<Vec<GratitudeEntry>, ClientError> {
        self.api.get_json("/api/users/gratitude").await
    }

    /// Append a gratitude entry; the server returns the full updated list
    pub async fn add_gratitude_entry(
        &self,
        entry: &NewGratitudeEntry,
    ) -> Result<Vec<GratitudeEntry>, ClientError> {
        self.api.post_json("/api/users/gratitude", entry).await
    }

    /// Fetch the chat history in chronological order
    pub async fn chat_history(&self) -> Result<Vec<ChatMessage>, ClientError> {
        self.api.get_json("/api/users/chat").await
    }

    /// Append a chat message; the server returns the full updated list
    pub async fn add_chat_message(
        &self,
        message: &NewChatMessage,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.api.post_json("/api/users/chat", message).await
    }
}
