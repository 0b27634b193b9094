//! User persistence
//!
//! Accounts carry a provider-issued `subject_id` alongside their database
//! primary key. Journal rows hang off the subject id so the client never
//! needs to learn the internal uuid.

use crate::backend::error::ApiError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// A stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub subject_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        subject_id: row.get("subject_id"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Create a new credentialed account. Fails with `Conflict` when the email
/// is already registered.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    display_name: Option<&str>,
) -> Result<User, ApiError> {
    let subject_id = Uuid::new_v4().to_string();
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, subject_id, email, display_name, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, subject_id, email, display_name, password_hash, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&subject_id)
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row_to_user(&row)),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(ApiError::Conflict("Email is already registered".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up an account by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let row = sqlx::query(
        r#"
        SELECT id, subject_id, email, display_name, password_hash, created_at, updated_at
        FROM users WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| row_to_user(&r)))
}

/// Look up an account by subject id
pub async fn get_user_by_subject(pool: &PgPool, subject_id: &str) -> Result<Option<User>, ApiError> {
    let row = sqlx::query(
        r#"
        SELECT id, subject_id, email, display_name, password_hash, created_at, updated_at
        FROM users WHERE subject_id = $1
        "#,
    )
    .bind(subject_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| row_to_user(&r)))
}

const UPSERT_USER_SQL: &str = r#"
    INSERT INTO users (id, subject_id, email, display_name)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (subject_id) DO UPDATE
        SET email = EXCLUDED.email,
            display_name = COALESCE(EXCLUDED.display_name, users.display_name),
            updated_at = NOW()
    RETURNING id, subject_id, email, display_name, password_hash, created_at, updated_at
"#;

/// Find the account for `subject_id`, creating it when absent.
///
/// The insert and the existence check happen in one statement so two
/// concurrent requests for the same subject cannot both insert. The email
/// follows the identity on conflict, so a provider-side address change
/// lands on the next authenticated request. When the incoming email is
/// taken by a row with a different subject id, the existing row wins and
/// is returned as-is.
pub async fn upsert_user(
    pool: &PgPool,
    subject_id: &str,
    email: &str,
    display_name: Option<&str>,
) -> Result<User, ApiError> {
    let result = sqlx::query(UPSERT_USER_SQL)
        .bind(Uuid::new_v4())
        .bind(subject_id)
        .bind(email)
        .bind(display_name)
        .fetch_one(pool)
        .await;

    match result {
        Ok(row) => Ok(row_to_user(&row)),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Email collision with a different subject; return the existing row.
            get_user_by_email(pool, email)
                .await?
                .ok_or(ApiError::Internal("User lookup failed after conflict".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
