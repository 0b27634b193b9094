//! MindMate server binary
//!
//! Loads `.env`, initializes tracing, connects to Postgres when
//! configured, and serves the API.

use mindmate::backend::server::{config, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindmate=debug,tower_http=debug".into()),
        )
        .init();

    let server_config = ServerConfig::from_env();
    let db_pool = config::load_database().await;
    let state = AppState::new(db_pool);

    let app = mindmate::backend::server::create_app(state);

    let address = server_config.bind_address();
    tracing::info!("Listening on http://{}", address);

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", address, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
