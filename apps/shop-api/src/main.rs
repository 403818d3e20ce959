//! Shop API - REST server for the product catalog, accounts and images

use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(app = config.app.name, version = config.app.version, "Starting");

    let db = connect_from_config_with_retry(config.postgres.clone(), None).await?;
    run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, &config.server, &config.cors)
        .merge(health_router(config.app));

    let db = state.db.clone();
    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing PostgreSQL pool");
        if let Err(e) = db.close().await {
            tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
