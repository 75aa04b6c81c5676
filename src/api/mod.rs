//! sensorlog REST API
//!
//! HTTP API layer built with Axum.
//!
//! # Endpoints
//!
//! - `GET /api/v1/sensors` - List all logged sensor series
//! - `GET /api/v1/sensors/:id` - One physical sensor with all its series
//! - `PUT /api/v1/sensors/:id` - Set the sensor's location
//! - `GET /api/v1/sensors/:id/readings` - Raw or bucket-mean series
//! - `GET /health` - Liveness and uptime

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use crate::config::ApiServerConfig;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sensors", get(routes::sensors::get_sensors))
        .route("/sensors/:id", get(routes::sensors::get_sensor))
        .route("/sensors/:id", put(routes::sensors::put_sensor))
        .route("/sensors/:id/readings", get(routes::sensors::get_readings));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("sensorlog API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("sensorlog API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
