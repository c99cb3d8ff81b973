use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use product_recommender::api::{create_router, AppState, RecommenderSettings};
use product_recommender::config::Config;
use product_recommender::db::{CatalogStore, CsvCatalogStore};
use product_recommender::models::Catalog;
use product_recommender::services::{generate_catalog, simulator::seeded_rng, DatasetOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let store = CsvCatalogStore::new(&config.catalog_path);
    let catalog = load_or_generate_catalog(&store, &config).await?;

    let state = AppState::new(catalog, Arc::new(store), RecommenderSettings::from(&config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Loads the catalog file, synthesizing and saving a fresh catalog when it does not exist yet
async fn load_or_generate_catalog(
    store: &CsvCatalogStore,
    config: &Config,
) -> anyhow::Result<Catalog> {
    if store.exists() {
        return Ok(store.load().await?);
    }

    tracing::info!(
        path = %store.path().display(),
        products = config.catalog_size,
        "Catalog file not found, generating dataset"
    );
    let options = DatasetOptions {
        count: config.catalog_size,
        ..DatasetOptions::default()
    };
    let catalog = generate_catalog(&options, &mut seeded_rng(config.rng_seed))?;
    store.save(&catalog).await?;
    Ok(catalog)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "Failed to listen for shutdown signal"),
    }
}
