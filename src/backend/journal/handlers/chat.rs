//! Companion chat handlers

use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;

use crate::backend::error::ApiError;
use crate::backend::journal::db;
use crate::backend::journal::handlers::ensure_user;
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::server::AppState;
use crate::shared::{ChatMessage, NewChatMessage};

/// GET /api/users/chat
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let pool = state.db()?;
    ensure_user(pool, &caller).await?;
    let messages = db::list_chat_messages(pool, &caller.subject).await?;
    Ok(Json(messages))
}

/// POST /api/users/chat
///
/// Persists one message (user or bot authored) and returns the full
/// history in chronological order.
pub async fn post_message(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<NewChatMessage>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let pool = state.db()?;

    if payload.content.trim().is_empty() {
        return Err(ApiError::validation("Message content is required"));
    }

    ensure_user(pool, &caller).await?;

    let message = ChatMessage {
        id: db::new_entry_id(),
        sender: payload.sender,
        content: payload.content,
        timestamp: Utc::now(),
    };
    db::insert_chat_message(pool, &caller.subject, &message).await?;

    let messages = db::list_chat_messages(pool, &caller.subject).await?;
    Ok(Json(messages))
}
