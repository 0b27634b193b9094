//! Client Error Taxonomy
//!
//! Normalized failures surfaced by the request client and everything built
//! on top of it. Expected conditions (missing token) never escape the
//! credential store as errors; by the time a `ClientError` exists it is
//! meant for the presentation layer.

use thiserror::Error;

use crate::shared::{ErrorBody, SharedError};

/// Errors surfaced by the client core
#[derive(Debug, Error)]
pub enum ClientError {
    /// No credential could be obtained at all
    #[error("authentication required: no credential could be obtained")]
    Auth,

    /// A protected operation was attempted outside an authenticated session
    #[error("not authenticated")]
    NotAuthenticated,

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server rejected the request after the single 401 retry
    #[error("api error ({status}): {}", body.error)]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error body (best-effort; degrades to the status line)
        body: ErrorBody,
    },

    /// Malformed local input, caught before any network call
    #[error(transparent)]
    Validation(#[from] SharedError),
}

impl ClientError {
    /// Build the API-error variant from a status and body
    pub fn api(status: u16, body: ErrorBody) -> Self {
        Self::Api { status, body }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth | Self::NotAuthenticated => "Please sign in again.".to_string(),
            Self::Network(_) => "Connection problem. Please try again.".to_string(),
            Self::Api { body, .. } => body
                .message
                .clone()
                .unwrap_or_else(|| body.error.clone()),
            Self::Validation(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ClientError::api(404, ErrorBody::new("User not found"));
        let display = format!("{}", error);
        assert!(display.contains("404"));
        assert!(display.contains("User not found"));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let error = ClientError::api(
            400,
            ErrorBody::new("Validation failed").with_message("content is required"),
        );
        assert_eq!(error.user_message(), "content is required");
    }

    #[test]
    fn test_user_message_for_auth() {
        assert_eq!(ClientError::Auth.user_message(), "Please sign in again.");
        assert_eq!(
            ClientError::NotAuthenticated.user_message(),
            "Please sign in again."
        );
    }
}
