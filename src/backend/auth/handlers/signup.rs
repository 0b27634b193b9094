//! Account signup handler

use axum::extract::State;
use axum::Json;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::{sessions, users};
use crate::backend::error::ApiError;
use crate::backend::server::AppState;

/// POST /api/auth/signup
///
/// Registers a credentialed account and returns a token pair.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = state.db()?;

    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation("A valid email is required"));
    }
    if request.password.len() < 8 {
        return Err(ApiError::validation("Password must be at least 8 characters"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = users::create_user(pool, &email, &password_hash, request.display_name.as_deref())
        .await?;

    tracing::info!("New account registered: {}", user.subject_id);

    let token =
        sessions::create_access_token(&user.subject_id, &user.email, user.display_name.as_deref())
            .map_err(|e| ApiError::Internal(format!("Token creation failed: {}", e)))?;
    let refresh_token =
        sessions::create_refresh_token(&user.subject_id, &user.email, user.display_name.as_deref())
            .map_err(|e| ApiError::Internal(format!("Token creation failed: {}", e)))?;

    Ok(Json(AuthResponse {
        token,
        refresh_token,
        expires_in: sessions::ACCESS_TOKEN_TTL_SECS as i64,
        user: UserResponse {
            id: user.id.to_string(),
            subject_id: user.subject_id,
            email: user.email,
            display_name: user.display_name,
        },
    }))
}
