//! Data transfer objects
//!
//! Request and response types for the REST endpoints. The store's own
//! projections (`SystemStatus`, `AllLatest`, `TelemetryRecord`) already
//! match the wire format and are returned directly; only the thin
//! request/acknowledgement shapes live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for history reads
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Maximum records to return; defaults to 100, must be positive
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Ingest acknowledgement
///
/// Shape matches what deployed device firmware already expects.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Always "success"
    pub status: String,
    /// Human-readable confirmation
    pub message: String,
    /// Server timestamp stamped onto the accepted record
    pub timestamp: DateTime<Utc>,
}

impl IngestResponse {
    pub fn accepted(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "success".to_string(),
            message: "Data received".to_string(),
            timestamp,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Current server time
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
