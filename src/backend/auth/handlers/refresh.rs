//! Token refresh handler

use axum::Json;

use crate::backend::auth::handlers::types::{RefreshRequest, RefreshResponse};
use crate::backend::auth::sessions;
use crate::backend::error::ApiError;

/// POST /api/auth/refresh
///
/// Exchanges a valid refresh token for a new access token. Runs without
/// touching the database so a degraded server can still keep sessions
/// alive.
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let claims = sessions::verify_refresh_token(&request.refresh_token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired refresh token"))?;

    tracing::debug!("Refreshing session for {}", claims.sub);

    let token = sessions::create_access_token(&claims.sub, &claims.email, claims.name.as_deref())
        .map_err(|e| ApiError::Internal(format!("Token creation failed: {}", e)))?;

    Ok(Json(RefreshResponse {
        token,
        expires_in: sessions::ACCESS_TOKEN_TTL_SECS as i64,
    }))
}
