//! Emotion Keyword Analysis
//!
//! A fixed keyword-to-category lookup: linear substring search over a
//! static table, no scoring or learning. Also carries the
//! concerning-content screen and the aggregate helpers the dashboard uses,
//! plus the debounced draft analyzer for entry composition.

use std::collections::HashMap;

use tokio::sync::watch;

use crate::client::debounce::Debouncer;
use crate::shared::{DiaryEntry, EmotionKind};

/// Keyword table, one row per emotion label
const EMOTION_KEYWORDS: [(EmotionKind, &[&str]); 11] = [
    (EmotionKind::Happy, &["happy", "joy", "glad", "delighted", "wonderful", "great"]),
    (EmotionKind::Excited, &["excited", "thrilled", "enthusiastic", "eager", "pumped"]),
    (EmotionKind::Calm, &["calm", "peaceful", "relaxed", "serene", "tranquil"]),
    (EmotionKind::Grateful, &["grateful", "thankful", "blessed", "appreciate", "gratitude"]),
    (EmotionKind::Hopeful, &["hopeful", "optimistic", "looking forward", "positive"]),
    (EmotionKind::Neutral, &["okay", "fine", "neutral", "average"]),
    (EmotionKind::Sad, &["sad", "unhappy", "depressed", "down", "blue", "upset", "miserable"]),
    (EmotionKind::Anxious, &["anxious", "worried", "nervous", "uneasy", "fear", "scared"]),
    (EmotionKind::Stressed, &["stressed", "pressure", "overwhelm", "burden", "tension"]),
    (EmotionKind::Angry, &["angry", "mad", "furious", "irritated", "annoyed", "frustrated"]),
    (EmotionKind::Overwhelmed, &["overwhelmed", "too much", "cannot handle", "drowning"]),
];

/// Phrases that flag content as potentially needing support
const CONCERNING_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "self-harm",
    "hurt myself",
    "hopeless",
    "no reason to live",
    "better off dead",
    "can't go on",
];

/// Detect emotions in free text via keyword matching
///
/// Defaults to `Neutral` when nothing matches.
pub fn analyze(text: &str) -> Vec<EmotionKind> {
    let lowercase = text.to_lowercase();
    let mut detected: Vec<EmotionKind> = EMOTION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| lowercase.contains(keyword)))
        .map(|(kind, _)| *kind)
        .collect();

    if detected.is_empty() {
        detected.push(EmotionKind::Neutral);
    }
    detected
}

/// Detect potentially concerning content that might need support
pub fn is_concerning(text: &str) -> bool {
    let lowercase = text.to_lowercase();
    CONCERNING_KEYWORDS
        .iter()
        .any(|keyword| lowercase.contains(keyword))
}

/// Most frequent emotion in a list; `Neutral` for an empty list
pub fn dominant(emotions: &[EmotionKind]) -> EmotionKind {
    let mut counts: HashMap<EmotionKind, usize> = HashMap::new();
    for emotion in emotions {
        *counts.entry(*emotion).or_insert(0) += 1;
    }

    // Stable tie-break: first in vocabulary order wins.
    let mut best = EmotionKind::Neutral;
    let mut best_count = 0;
    for kind in EmotionKind::ALL {
        if let Some(&count) = counts.get(&kind) {
            if count > best_count {
                best = kind;
                best_count = count;
            }
        }
    }
    best
}

/// Per-label tag counts across a set of diary entries
///
/// Every label appears in the result, zero-count ones included, in the
/// stable vocabulary order.
pub fn frequencies(entries: &[DiaryEntry]) -> Vec<(EmotionKind, usize)> {
    let mut counts: HashMap<EmotionKind, usize> = HashMap::new();
    for entry in entries {
        for emotion in &entry.emotions {
            *counts.entry(emotion.kind).or_insert(0) += 1;
        }
    }
    EmotionKind::ALL
        .iter()
        .map(|kind| (*kind, counts.get(kind).copied().unwrap_or(0)))
        .collect()
}

/// Debounced emotion preview for a diary entry being composed
///
/// Each draft owns its own debouncer, so two compose surfaces never cancel
/// each other's pending analysis.
pub struct DiaryDraft {
    debouncer: Debouncer,
    preview: watch::Sender<Vec<EmotionKind>>,
}

impl DiaryDraft {
    pub fn new(delay: std::time::Duration) -> Self {
        let (preview, _) = watch::channel(Vec::new());
        Self {
            debouncer: Debouncer::new(delay),
            preview,
        }
    }

    /// Subscribe to the detected-emotion preview
    pub fn subscribe(&self) -> watch::Receiver<Vec<EmotionKind>> {
        self.preview.subscribe()
    }

    /// Update the draft content; analysis runs after the debounce delay
    pub async fn set_content(&self, content: String) {
        let preview = self.preview.clone();
        self.debouncer
            .debounce(move || async move {
                preview.send_replace(analyze(&content));
            })
            .await;
    }
}
