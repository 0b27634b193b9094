//! Journal resource handlers

pub mod chat;
pub mod diary;
pub mod gratitude;
pub mod users;

use crate::backend::auth::users::{self as user_db, User};
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthenticatedUser;
use crate::shared::{default_display_name, UserRecord};
use sqlx::PgPool;

/// Make sure the caller's user record exists, creating it when absent.
///
/// Every journal handler goes through this, so signing in for the first
/// time and immediately posting an entry works without a separate
/// provisioning round-trip.
pub(crate) async fn ensure_user(
    pool: &PgPool,
    caller: &AuthenticatedUser,
) -> Result<User, ApiError> {
    user_db::upsert_user(pool, &caller.subject, &caller.email, caller.display_name.as_deref())
        .await
}

/// Project an account row into the wire record
pub(crate) fn to_record(user: User) -> UserRecord {
    let display_name = default_display_name(user.display_name.as_deref(), &user.email);
    UserRecord {
        id: user.id.to_string(),
        subject_id: user.subject_id,
        email: user.email,
        display_name,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}
