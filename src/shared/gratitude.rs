//! Gratitude Wall Entry Data Structures
//!
//! Gratitude entries are append-only. The 200-character limit is a client
//! convention enforced before the network call; the server does not reject
//! longer content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-side length convention for gratitude entries.
pub const GRATITUDE_MAX_LEN: usize = 200;

/// A persisted gratitude entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GratitudeEntry {
    /// Server-assigned id
    pub id: String,
    /// Entry text
    pub content: String,
    /// When the entry was created
    pub date: DateTime<Utc>,
}

/// Payload for creating a gratitude entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewGratitudeEntry {
    pub content: String,
}
