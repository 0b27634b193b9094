//! Backend Error Module
//!
//! Error types used by HTTP handlers and their conversion to responses.
//! Every error renders as the `{error, message?}` JSON body with a status
//! conveying the failure class: 401 auth, 400 validation, 404 not found,
//! 409 conflict, 500 server, 503 database unavailable.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::shared::ErrorBody;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed or rejected credential
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Request payload failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness conflict
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database was not configured at startup
    #[error("database not configured")]
    Unavailable,

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error
    ///
    /// Database details are logged, never sent to the client.
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Unauthorized(message) => {
                ErrorBody::new("Unauthorized").with_message(message.clone())
            }
            Self::Validation(message) => {
                ErrorBody::new("Validation failed").with_message(message.clone())
            }
            Self::NotFound(message) => ErrorBody::new("Not found").with_message(message.clone()),
            Self::Conflict(message) => ErrorBody::new("Conflict").with_message(message.clone()),
            Self::Unavailable => ErrorBody::new("Service unavailable")
                .with_message("database not configured".to_string()),
            Self::Database(_) | Self::Internal(_) => ErrorBody::new("Server error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self);
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::validation("bad entry").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("user".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("email taken".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::Unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_details_not_leaked() {
        let body = ApiError::Database(sqlx::Error::RowNotFound).body();
        assert_eq!(body.error, "Server error");
        assert!(body.message.is_none());
    }

    #[test]
    fn test_validation_body_carries_message() {
        let body = ApiError::validation("content is required").body();
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.message.as_deref(), Some("content is required"));
    }
}
