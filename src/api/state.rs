//! Application state
//!
//! Shared state accessible by all API handlers, wrapped in Arc for
//! thread-safe sharing across async tasks. The store and hub are
//! constructed at process start and injected here; nothing in the service
//! reaches for globals.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::store::TelemetryStore;
use crate::websocket::SubscriptionHub;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Telemetry store: histories, snapshots, liveness, counter
    pub store: Arc<TelemetryStore>,
    /// Subscription hub for real-time fan-out
    pub hub: Arc<SubscriptionHub>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime reporting
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(store: Arc<TelemetryStore>, hub: Arc<SubscriptionHub>, config: ApiConfig) -> Self {
        Self {
            store,
            hub,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
