//! sensorlog API server
//!
//! Run with: cargo run --bin sensorlog-api
//!
//! # Configuration
//!
//! Environment variables (override the TOML config):
//! - `SENSORLOG_DATA_DIR`: Storage root (default: platform data dir)
//! - `SENSORLOG_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SENSORLOG_API_PORT`: Port to listen on (default: 8077)
//! - `SENSORLOG_LOG_LEVEL` / `SENSORLOG_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely

use sensorlog::api::{serve, AppState};
use sensorlog::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sensorlog={},tower_http=debug", config.logging.level).into()
    });
    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting sensorlog API server v{}", env!("CARGO_PKG_VERSION"));

    let root = config.data_dir();
    tracing::info!("Storage root: {:?}", root);
    std::fs::create_dir_all(&root)?;

    let state = AppState::new(root);
    serve(state, &config.api).await?;

    tracing::info!("sensorlog API server stopped");
    Ok(())
}
