//! User Record Projection
//!
//! The server-side projection of an authenticated identity, keyed by the
//! identity subject id. Created lazily (atomic upsert) on the first
//! authenticated request if absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record as returned by `/api/users` and `/api/users/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Record id (UUID)
    pub id: String,
    /// Identity subject id (unique)
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    /// Email address (unique)
    pub email: String,
    /// Display name, defaulted from the email local-part when blank
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Created at timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Derive a display name from an email when none was supplied.
///
/// `a@b.com` becomes `a`; an email without a local part falls back to
/// "Anonymous User", same as a completely blank identity.
pub fn default_display_name(display_name: Option<&str>, email: &str) -> String {
    if let Some(name) = display_name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    match email.split('@').next() {
        Some(local) if !local.trim().is_empty() => local.trim().to_string(),
        _ => "Anonymous User".to_string(),
    }
}
