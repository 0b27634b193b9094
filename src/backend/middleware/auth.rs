//! Bearer token verification middleware
//!
//! Protected routes run behind this layer. Token verification is purely
//! cryptographic; handlers that need the account row look it up (or create
//! it) themselves.

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::backend::auth::sessions;
use crate::backend::error::ApiError;

/// Verified identity, inserted into request extensions for handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Verify the `Authorization: Bearer` header on the request
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization header"))?;

    let claims = sessions::verify_access_token(token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        subject: claims.sub,
        email: claims.email,
        display_name: claims.name,
    });

    Ok(next.run(request).await)
}
