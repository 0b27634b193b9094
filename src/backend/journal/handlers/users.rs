//! User record handlers

use axum::extract::State;
use axum::{Extension, Json};

use crate::backend::auth::users as user_db;
use crate::backend::error::ApiError;
use crate::backend::journal::handlers::{ensure_user, to_record};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::server::AppState;
use crate::shared::UserRecord;

/// POST /api/users
///
/// Find-or-create the caller's user record. Safe to call repeatedly; the
/// upsert makes concurrent first calls converge on one row.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<UserRecord>, ApiError> {
    let pool = state.db()?;
    let user = ensure_user(pool, &caller).await?;
    tracing::debug!("User record ready for {}", user.subject_id);
    Ok(Json(to_record(user)))
}

/// GET /api/users/me
///
/// Returns the caller's record, provisioning it lazily when the original
/// provisioning call never landed.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<UserRecord>, ApiError> {
    let pool = state.db()?;
    let user = match user_db::get_user_by_subject(pool, &caller.subject).await? {
        Some(user) => user,
        None => ensure_user(pool, &caller).await?,
    };
    Ok(Json(to_record(user)))
}
