//! Router Configuration
//!
//! Auth routes are public; everything under `/api/users` requires a valid
//! bearer token and runs behind the auth middleware. Unknown paths get a
//! JSON 404 in the same `{error, message?}` shape as every other failure.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::backend::auth::handlers::{login, refresh, signup};
use crate::backend::error::ApiError;
use crate::backend::journal::handlers::{chat, diary, gratitude, users};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// - `POST /api/auth/signup` - register an account
/// - `POST /api/auth/login` - exchange credentials for tokens
/// - `POST /api/auth/refresh` - exchange a refresh token for a new access token
/// - `POST /api/users` - find-or-create the caller's user record
/// - `GET /api/users/me` - current user record
/// - `GET|POST /api/users/diary` - diary entries
/// - `GET|POST /api/users/gratitude` - gratitude entries
/// - `GET|POST /api/users/chat` - companion chat history
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/users/me", get(users::current_user))
        .route(
            "/api/users/diary",
            get(diary::list_entries).post(diary::create_entry),
        )
        .route(
            "/api/users/gratitude",
            get(gratitude::list_entries).post(gratitude::create_entry),
        )
        .route(
            "/api/users/chat",
            get(chat::list_messages).post(chat::post_message),
        )
        .layer(middleware::from_fn(auth_middleware));

    auth_routes
        .merge(protected_routes)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Unknown route".to_string())
}
