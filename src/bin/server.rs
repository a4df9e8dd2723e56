//! CareOps HTTP Server Binary
//!
//! This is the main entry point for the CareOps REST API server.
//! It loads configuration and the CSV tables, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! CAREOPS_DATA_DIR=/path/to/csv cargo run --bin careops-server
//! ```
//!
//! # Environment Variables
//!
//! - `CAREOPS_CONFIG`: Path to careops.toml (default: searched in standard locations)
//! - `CAREOPS_DATA_DIR`: Directory with the CSV tables (overrides the config file)
//! - `HOST`: Server host (overrides the config file)
//! - `PORT`: Server port (overrides the config file)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveTime;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use careops::config::AppConfig;
use careops::data::TableStore;
use careops::http::{create_router, AppState};
use careops::models::{Clock, FixedClock, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting CareOps HTTP Server");

    // Load configuration: explicit path, standard locations, or defaults.
    let config = match env::var("CAREOPS_CONFIG") {
        Ok(path) => AppConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        Err(_) => AppConfig::from_default_location().unwrap_or_else(|e| {
            warn!("{}; using built-in defaults", e);
            AppConfig::default()
        }),
    };
    config.validate().context("invalid configuration")?;

    let data_dir = env::var("CAREOPS_DATA_DIR")
        .map(Into::into)
        .unwrap_or_else(|_| config.data.data_dir.clone());
    let store = TableStore::from_dir(&data_dir)
        .with_context(|| format!("loading tables from {}", data_dir.display()))?;
    let snapshot = store.snapshot();
    info!(
        encounters = snapshot.encounters.len(),
        claims = snapshot.claims.len(),
        patients = snapshot.patients.len(),
        fingerprint = %snapshot.fingerprint,
        "tables loaded"
    );

    // A pinned reference date keeps default as-of resolution reproducible
    // for deployments serving a static snapshot.
    let clock: Arc<dyn Clock> = match config.server.reference_date {
        Some(date) => {
            info!(%date, "clock pinned to reference date");
            Arc::new(FixedClock(date.and_time(NaiveTime::MIN).and_utc()))
        }
        None => Arc::new(SystemClock),
    };

    let host = env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);

    let state = AppState::new(Arc::new(store), Arc::new(config), clock);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
