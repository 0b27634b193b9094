//! Application State Management
//!
//! `AppState` is the shared state handed to every handler. The database
//! pool is optional so the server (and router tests) can run without a
//! live Postgres instance; handlers that need it answer 503 when it is
//! absent.

use crate::backend::error::ApiError;
use sqlx::PgPool;

/// Central application state
#[derive(Clone)]
pub struct AppState {
    /// Optional database connection pool
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// State with a configured database
    pub fn new(db_pool: Option<PgPool>) -> Self {
        Self { db_pool }
    }

    /// Get the database pool, or fail with a 503-mapped error
    pub fn db(&self) -> Result<&PgPool, ApiError> {
        self.db_pool.as_ref().ok_or(ApiError::Unavailable)
    }
}
