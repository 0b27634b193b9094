//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the backend. All types serialize to the JSON wire format
//! the REST API speaks; timestamps travel as RFC 3339 strings via chrono's
//! serde support.

/// Diary entry and emotion types
pub mod diary;

/// Gratitude wall entry types
pub mod gratitude;

/// Companion chat message types
pub mod chat;

/// User record projection
pub mod user;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use chat::{ChatMessage, NewChatMessage, Sender};
pub use diary::{DiaryEntry, Emotion, EmotionKind, NewDiaryEntry};
pub use error::{ErrorBody, SharedError};
pub use gratitude::{GratitudeEntry, NewGratitudeEntry};
pub use user::{default_display_name, UserRecord};
