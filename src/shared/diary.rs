//! Diary Entry Data Structures
//!
//! A diary entry is immutable once created: the server exposes no update
//! endpoint, and any client-side "edit" only touches local state. Each entry
//! carries an ordered list of tagged emotions whose intensity is always
//! clamped to the 1..=10 range, on every path that constructs one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest intensity an emotion tag can carry.
pub const MIN_INTENSITY: u8 = 1;
/// Highest intensity an emotion tag can carry.
pub const MAX_INTENSITY: u8 = 10;

/// The fixed emotion vocabulary
///
/// Labels are drawn from this enumerated set and nothing else; unknown
/// labels fail deserialization and are rejected with a validation error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmotionKind {
    Happy,
    Excited,
    Calm,
    Grateful,
    Hopeful,
    Neutral,
    Sad,
    Anxious,
    Stressed,
    Angry,
    Overwhelmed,
}

impl EmotionKind {
    /// All known emotion labels, in a stable order.
    pub const ALL: [EmotionKind; 11] = [
        EmotionKind::Happy,
        EmotionKind::Excited,
        EmotionKind::Calm,
        EmotionKind::Grateful,
        EmotionKind::Hopeful,
        EmotionKind::Neutral,
        EmotionKind::Sad,
        EmotionKind::Anxious,
        EmotionKind::Stressed,
        EmotionKind::Angry,
        EmotionKind::Overwhelmed,
    ];

    /// Label as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionKind::Happy => "happy",
            EmotionKind::Excited => "excited",
            EmotionKind::Calm => "calm",
            EmotionKind::Grateful => "grateful",
            EmotionKind::Hopeful => "hopeful",
            EmotionKind::Neutral => "neutral",
            EmotionKind::Sad => "sad",
            EmotionKind::Anxious => "anxious",
            EmotionKind::Stressed => "stressed",
            EmotionKind::Angry => "angry",
            EmotionKind::Overwhelmed => "overwhelmed",
        }
    }
}

/// An emotion label with its intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Emotion {
    /// Emotion label, drawn from the fixed vocabulary
    #[serde(rename = "type")]
    pub kind: EmotionKind,
    /// Intensity in 1..=10
    pub intensity: u8,
}

impl Emotion {
    /// Create an emotion tag, clamping the intensity into range.
    ///
    /// Out-of-range intensities are clamped rather than rejected: 15
    /// becomes 10, 0 becomes 1.
    pub fn new(kind: EmotionKind, intensity: u8) -> Self {
        Self {
            kind,
            intensity: intensity.clamp(MIN_INTENSITY, MAX_INTENSITY),
        }
    }

    /// Re-clamp the intensity into range.
    ///
    /// Used on values that arrived over the wire and bypassed `new`.
    pub fn clamped(self) -> Self {
        Self::new(self.kind, self.intensity)
    }
}

/// A persisted diary entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiaryEntry {
    /// Server-assigned id
    pub id: String,
    /// Entry text (non-empty)
    pub content: String,
    /// When the entry was created
    pub date: DateTime<Utc>,
    /// Ordered emotion tags
    pub emotions: Vec<Emotion>,
    /// Whether the entry is visible on the public wall
    #[serde(rename = "isPublic")]
    pub is_public: bool,
}

/// Payload for creating a diary entry
///
/// The id and date are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDiaryEntry {
    pub content: String,
    pub emotions: Vec<Emotion>,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
}

impl NewDiaryEntry {
    /// Build a payload with every intensity clamped into range.
    pub fn new(content: impl Into<String>, emotions: Vec<Emotion>, is_public: bool) -> Self {
        Self {
            content: content.into(),
            emotions: emotions.into_iter().map(Emotion::clamped).collect(),
            is_public,
        }
    }
}
