//! Application construction

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::backend::routes::create_router;
use crate::backend::server::state::AppState;

/// Build the full application from shared state
///
/// Combines the route tree with the CORS layer. Split out from `main` so
/// integration tests can build the exact app the binary serves.
pub fn create_app(state: AppState) -> Router {
    create_router(state).layer(CorsLayer::permissive())
}
