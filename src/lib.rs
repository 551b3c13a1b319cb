//! # Samudra
//!
//! Maritime telemetry backend: ingests periodic readings from vessels,
//! buoys, and base stations, keeps a bounded recent history and liveness
//! state per source, and streams every accepted update to dashboard
//! clients in real time.
//!
//! ## Modules
//!
//! - [`store`]: the concurrent telemetry core (bounded history, latest
//!   snapshots, liveness, periodic sweeper)
//! - [`websocket`]: subscription hub and real-time streaming
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use samudra::api::{serve, AppState};
//! use samudra::config::Config;
//! use samudra::store::{sweeper, TelemetryStore};
//! use samudra::websocket::{HubConfig, SubscriptionHub};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!
//!     let store = Arc::new(TelemetryStore::new(&config.store));
//!     let hub = Arc::new(SubscriptionHub::new(HubConfig::default()));
//!
//!     let sweep = sweeper::start(
//!         Arc::clone(&store),
//!         Duration::from_secs(config.store.sweep_interval_secs),
//!     );
//!
//!     let state = AppState::new(store, hub, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     sweep.abort();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;
pub mod websocket;

// Re-export top-level types for convenience
pub use store::{
    AllLatest, BoundedHistory, Category, LivenessState, LivenessTracker, StoreError, StoreResult,
    SystemStatus, TelemetryRecord, TelemetryStore,
};

pub use websocket::{
    websocket_handler, ClientMessage, HubConfig, HubError, ServerMessage, SubscriptionHub,
    TelemetryEvent,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, StoreConfig, WebSocketConfig};
