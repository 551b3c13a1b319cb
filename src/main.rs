//! Samudra telemetry server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from `config.toml` (see [`samudra::config`]) with environment
//! overrides:
//! - `SAMUDRA_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SAMUDRA_API_PORT` / `PORT`: Port to listen on (default: 8000)
//! - `SAMUDRA_HISTORY_CAPACITY`: Records kept per category (default: 1000)
//! - `SAMUDRA_LIVENESS_THRESHOLD_SECS`: Offline threshold (default: 30)
//! - `SAMUDRA_SWEEP_INTERVAL_SECS`: Sweep cadence (default: 30)
//! - `RUST_LOG`: Log filter (default: samudra=info,tower_http=debug)

use samudra::api::{serve, AppState};
use samudra::config::Config;
use samudra::store::{sweeper, TelemetryStore};
use samudra::websocket::{HubConfig, SubscriptionHub};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config);

    tracing::info!("Starting Samudra telemetry server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        history_capacity = config.store.history_capacity,
        liveness_threshold_secs = config.store.liveness_threshold_secs,
        sweep_interval_secs = config.store.sweep_interval_secs,
        "Store configuration"
    );

    let store = Arc::new(TelemetryStore::new(&config.store));
    let hub = Arc::new(SubscriptionHub::new(HubConfig {
        max_subscribers: config.websocket.max_subscribers,
        event_capacity: config.websocket.event_capacity,
    }));

    // Liveness sweeper runs for the life of the process
    let sweep_handle = sweeper::start(
        Arc::clone(&store),
        Duration::from_secs(config.store.sweep_interval_secs),
    );

    let state = AppState::new(Arc::clone(&store), Arc::clone(&hub), config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    sweep_handle.abort();
    tracing::info!("Samudra telemetry server stopped");

    Ok(())
}

/// Initialize tracing from config, honoring RUST_LOG when set
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "samudra={},tower_http=debug",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
