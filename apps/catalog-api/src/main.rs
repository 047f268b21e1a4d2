use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::InMemoryCatalog;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        path = %config.catalog.data_path.display(),
        "Loading catalog snapshot"
    );
    let catalog = InMemoryCatalog::load(&config.catalog.data_path)
        .await
        .map_err(|e| eyre::eyre!("Catalog snapshot failed to load: {}", e))?;
    info!(products = catalog.product_count(), "Catalog ready");

    let state = AppState { config, catalog };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the catalog read model
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        public_base_url = %state.config.public_base_url(),
        "Starting catalog API (30s shutdown timeout)"
    );

    let server = state.config.server.clone();
    create_production_app(
        app,
        &server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: releasing catalog snapshot");
            drop(state);
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
