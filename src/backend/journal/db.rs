//! Journal database operations
//!
//! All rows are keyed by the owner's subject id, with entry ids unique per
//! user rather than globally. Ids are the creation timestamp in
//! milliseconds rendered as a string, disambiguated when two land in the
//! same millisecond. Ordering is fixed per resource: diary and gratitude
//! newest first, chat in chronological order, ids breaking timestamp ties.

use crate::backend::error::ApiError;
use crate::shared::{ChatMessage, DiaryEntry, Emotion, GratitudeEntry, Sender};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ENTRY_ID: AtomicI64 = AtomicI64::new(0);

/// Mint an entry id from the current time
///
/// Two mints in the same millisecond (a user message and its bot reply,
/// or two users posting at once) bump past the previous id, so ids are
/// strictly increasing within the process and never collide.
pub fn new_entry_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ENTRY_ID.load(Ordering::Relaxed);
    loop {
        let candidate = if now > last { now } else { last + 1 };
        match LAST_ENTRY_ID.compare_exchange_weak(
            last,
            candidate,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => last = observed,
        }
    }
}

/// List diary entries for a subject, newest first
pub async fn list_diary_entries(
    pool: &PgPool,
    subject_id: &str,
) -> Result<Vec<DiaryEntry>, ApiError> {
    let rows = sqlx::query(
        r#"
        SELECT id, content, date, emotions, is_public
        FROM diary_entries
        WHERE subject_id = $1
        ORDER BY date DESC, id DESC
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let emotions: Json<Vec<Emotion>> = row.get("emotions");
            DiaryEntry {
                id: row.get("id"),
                content: row.get("content"),
                date: row.get("date"),
                emotions: emotions.0,
                is_public: row.get("is_public"),
            }
        })
        .collect())
}

/// Insert a diary entry
pub async fn insert_diary_entry(
    pool: &PgPool,
    subject_id: &str,
    entry: &DiaryEntry,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO diary_entries (id, subject_id, content, date, emotions, is_public)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&entry.id)
    .bind(subject_id)
    .bind(&entry.content)
    .bind(entry.date)
    .bind(Json(&entry.emotions))
    .bind(entry.is_public)
    .execute(pool)
    .await?;

    Ok(())
}

/// List gratitude entries for a subject, newest first
pub async fn list_gratitude_entries(
    pool: &PgPool,
    subject_id: &str,
) -> Result<Vec<GratitudeEntry>, ApiError> {
    let rows = sqlx::query(
        r#"
        SELECT id, content, date
        FROM gratitude_entries
        WHERE subject_id = $1
        ORDER BY date DESC, id DESC
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| GratitudeEntry {
            id: row.get("id"),
            content: row.get("content"),
            date: row.get("date"),
        })
        .collect())
}

/// Insert a gratitude entry
pub async fn insert_gratitude_entry(
    pool: &PgPool,
    subject_id: &str,
    entry: &GratitudeEntry,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO gratitude_entries (id, subject_id, content, date)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&entry.id)
    .bind(subject_id)
    .bind(&entry.content)
    .bind(entry.date)
    .execute(pool)
    .await?;

    Ok(())
}

/// List chat messages for a subject in chronological order
pub async fn list_chat_messages(
    pool: &PgPool,
    subject_id: &str,
) -> Result<Vec<ChatMessage>, ApiError> {
    let rows = sqlx::query(
        r#"
        SELECT id, sender, content, timestamp
        FROM chat_messages
        WHERE subject_id = $1
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let sender: String = row.get("sender");
            let sender = parse_sender(&sender)?;
            let timestamp: DateTime<Utc> = row.get("timestamp");
            Ok(ChatMessage {
                id: row.get("id"),
                sender,
                content: row.get("content"),
                timestamp,
            })
        })
        .collect()
}

/// Insert a chat message
pub async fn insert_chat_message(
    pool: &PgPool,
    subject_id: &str,
    message: &ChatMessage,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO chat_messages (id, subject_id, sender, content, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&message.id)
    .bind(subject_id)
    .bind(message.sender.as_str())
    .bind(&message.content)
    .bind(message.timestamp)
    .execute(pool)
    .await?;

    Ok(())
}

fn parse_sender(value: &str) -> Result<Sender, ApiError> {
    match value {
        "user" => Ok(Sender::User),
        "bot" => Ok(Sender::Bot),
        other => Err(ApiError::Internal(format!("Unknown sender stored: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ids_are_millisecond_timestamps() {
        let id = new_entry_id();
        let parsed: i64 = id.parse().unwrap();
        let now = Utc::now().timestamp_millis();
        assert!((now - parsed).abs() < 5_000);
    }

    #[test]
    fn test_same_millisecond_mints_stay_distinct() {
        // Back-to-back mints (a user message and its bot reply) land in
        // the same millisecond; each must still get its own id.
        let ids: Vec<i64> = (0..64)
            .map(|_| new_entry_id().parse().unwrap())
            .collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "{} not after {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_parse_sender() {
        assert_eq!(parse_sender("user").unwrap(), Sender::User);
        assert_eq!(parse_sender("bot").unwrap(), Sender::Bot);
        assert!(parse_sender("admin").is_err());
    }
}
