//! Diary entry handlers

use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;

use crate::backend::error::ApiError;
use crate::backend::journal::db;
use crate::backend::journal::handlers::ensure_user;
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::server::AppState;
use crate::shared::{DiaryEntry, Emotion, NewDiaryEntry};

/// Response body for a created diary entry
#[derive(Debug, Serialize)]
pub struct DiaryCreated {
    pub success: bool,
    pub entry: DiaryEntry,
}

/// GET /api/users/diary
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<DiaryEntry>>, ApiError> {
    let pool = state.db()?;
    ensure_user(pool, &caller).await?;
    let entries = db::list_diary_entries(pool, &caller.subject).await?;
    Ok(Json(entries))
}

/// POST /api/users/diary
///
/// Persists an entry and returns just the created entry, not the full
/// list. Emotion intensities are clamped into 1..=10 before storage.
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<NewDiaryEntry>,
) -> Result<Json<DiaryCreated>, ApiError> {
    let pool = state.db()?;

    if payload.content.trim().is_empty() {
        return Err(ApiError::validation("Entry content is required"));
    }

    ensure_user(pool, &caller).await?;

    let entry = DiaryEntry {
        id: db::new_entry_id(),
        content: payload.content,
        date: Utc::now(),
        emotions: payload.emotions.into_iter().map(Emotion::clamped).collect(),
        is_public: payload.is_public,
    };
    db::insert_diary_entry(pool, &caller.subject, &entry).await?;

    tracing::debug!("Diary entry {} stored for {}", entry.id, caller.subject);
    Ok(Json(DiaryCreated { success: true, entry }))
}
