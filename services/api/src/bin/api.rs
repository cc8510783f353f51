//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        credentials_file::FileCredentialStore, points_file::FilePointsStore,
        session_memory::MemorySessionStore,
    },
    config::Config,
    error::ApiError,
    web::{api_router, state::AppState, ApiDoc},
};
use axum::Router;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Storage Adapters ---
    let credentials = Arc::new(FileCredentialStore::load(&config.data_dir).await?);
    let points = Arc::new(FilePointsStore::new(&config.data_dir));
    let sessions = Arc::new(MemorySessionStore::new(config.session_ttl_secs));
    info!("Storage adapters ready at {}", config.data_dir.display());

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        credentials,
        points,
        sessions,
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
