//! Gratitude wall handlers

use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;

use crate::backend::error::ApiError;
use crate::backend::journal::db;
use crate::backend::journal::handlers::ensure_user;
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::server::AppState;
use crate::shared::{GratitudeEntry, NewGratitudeEntry};

/// GET /api/users/gratitude
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<GratitudeEntry>>, ApiError> {
    let pool = state.db()?;
    ensure_user(pool, &caller).await?;
    let entries = db::list_gratitude_entries(pool, &caller.subject).await?;
    Ok(Json(entries))
}

/// POST /api/users/gratitude
///
/// Persists an entry and returns the caller's full updated list, newest
/// first.
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<NewGratitudeEntry>,
) -> Result<Json<Vec<GratitudeEntry>>, ApiError> {
    let pool = state.db()?;

    if payload.content.trim().is_empty() {
        return Err(ApiError::validation("Entry content is required"));
    }

    ensure_user(pool, &caller).await?;

    let entry = GratitudeEntry {
        id: db::new_entry_id(),
        content: payload.content,
        date: Utc::now(),
    };
    db::insert_gratitude_entry(pool, &caller.subject, &entry).await?;

    let entries = db::list_gratitude_entries(pool, &caller.subject).await?;
    Ok(Json(entries))
}
