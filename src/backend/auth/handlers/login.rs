//! Login handler

use axum::extract::State;
use axum::Json;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::{sessions, users};
use crate::backend::error::ApiError;
use crate::backend::server::AppState;

/// POST /api/auth/login
///
/// Verifies credentials and returns a token pair. Wrong email and wrong
/// password produce the same rejection.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = state.db()?;

    let email = request.email.trim().to_lowercase();
    let user = users::get_user_by_email(pool, &email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let verified = bcrypt::verify(&request.password, hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    tracing::info!("User signed in: {}", user.subject_id);

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
