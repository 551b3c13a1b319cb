//! Samudra REST API
//!
//! HTTP layer over the telemetry store, built with Axum.
//!
//! # Endpoints
//!
//! ## Ingest (device-facing)
//! - `POST /api/:category/data` - Submit a telemetry reading
//!
//! ## Reads (dashboard-facing)
//! - `GET /api/:category/latest` - Latest record for a category
//! - `GET /api/:category/history?limit=N` - Recent records, oldest first
//! - `GET /api/all/latest` - Latest data from all sources plus status
//! - `GET /api/status` - System status
//! - `GET /api/health` - Health check
//! - `GET /` - Service index
//!
//! ## WebSocket
//! - `GET /ws` - Real-time update stream
//!
//! Category path segments: `vessel`, `buoy`, `basestation` (also accepted
//! as `base_station`).

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let api_routes = Router::new()
        // Static segments win over :category, so /api/all/latest and
        // /api/status route correctly
        .route("/all/latest", get(routes::status::all_latest))
        .route("/status", get(routes::status::system_status))
        .route("/health", get(routes::health::health))
        .route("/:category/data", post(routes::ingest::ingest))
        .route("/:category/latest", get(routes::telemetry::latest))
        .route("/:category/history", get(routes::telemetry::history));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::status::index))
        .route("/ws", get(websocket_handler))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS layer from configured origins; "*" means any dashboard origin
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Samudra API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Samudra API shut down gracefully");
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
