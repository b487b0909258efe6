use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use crate::config::Config;
use crate::database::{create_database_connection, run_migrations};
use crate::geocoding::OpenCageGeocoder;
use crate::logging::init_logging;
use crate::routes::build_router;
use crate::state::AppState;

/// Loads configuration, prepares the store and serves the API until the process stops.
pub async fn run() -> anyhow::Result<()> {
    // .env must be loaded before the subscriber reads RUST_LOG
    dotenv().ok();
    init_logging();

    let config = Config::from_env()?;

    let db = create_database_connection(&config.database_url, config.database_max_connections).await?;
    run_migrations(&db).await?;

    let geocoder = Arc::new(OpenCageGeocoder::new(
        config.opencage_api_key.clone(),
        config.opencage_base_url.clone(),
    ));
    let state = AppState::new(db, geocoder, config.session_ttl);
    state.sessions.cleanup_expired().await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    info!(addr = %config.server_addr, "server running");

    axum::serve(listener, app).await?;
    Ok(())
}
