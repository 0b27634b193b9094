//! Authentication wire types

use serde::{Deserialize, Serialize};

/// Signup request payload
#[derive(Debug, Deserialize, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Login request payload
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh request payload
#[derive(Debug, Deserialize, Serialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// User body embedded in auth responses
#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Response for signup and login
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Response for token refresh
#[derive(Debug, Deserialize, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}
