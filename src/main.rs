//! Application entry point for trackyrs.
//!
//! Initializes all components and starts the HTTP API server.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod jikan;
pub mod logging;
pub mod model;
pub mod repository;
pub mod service;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;

use crate::config::Config;
use crate::logging::setup_logging;
use crate::repository::Repository;
use crate::service::Services;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config().await?;

    let db = setup_database(&config, init_start).await?;
    let services = setup_services(db, &config).await?;

    info!(
        "trackyrs initialized in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );

    api::serve(config, services).await
}

async fn load_config() -> Result<Arc<Config>> {
    debug!("Loading configuration...");
    let mut config = Config::new();
    config.load()?;
    let config = Arc::new(config);
    setup_logging(&config)?;
    info!("Starting trackyrs...");
    Ok(config)
}

async fn setup_database(config: &Config, init_start: Instant) -> Result<Arc<Repository>> {
    debug!("Setting up Repository...");
    let db = Arc::new(Repository::new(&config.db_url).await?);

    info!("Running database migrations...");
    db.run_migrations().await?;
    info!(
        "Database setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );

    Ok(db)
}

async fn setup_services(db: Arc<Repository>, config: &Config) -> Result<Arc<Services>> {
    debug!("Setting up Services...");
    Ok(Arc::new(Services::new(db, config)?))
}
