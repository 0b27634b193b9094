//! Companion Chat Message Data Structures
//!
//! Chat history is append-only. Bot replies are generated locally on the
//! client and are only persisted when explicitly posted through the same
//! endpoint as user messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Sender as it appears on the wire / in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A persisted chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Server-assigned id
    pub id: String,
    /// Message author
    pub sender: Sender,
    /// Message text
    pub content: String,
    /// When the message was sent
    pub timestamp: DateTime<Utc>,
}

/// Payload for posting a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewChatMessage {
    pub sender: Sender,
    pub content: String,
}
