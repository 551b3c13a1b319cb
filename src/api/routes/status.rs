//! System-level read routes
//!
//! - GET /api/status - aggregate liveness and message counter
//! - GET /api/all/latest - latest record per category plus status
//! - GET / - service index with endpoint documentation

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::store::{AllLatest, SystemStatus};

/// GET /api/status
pub async fn system_status(State(state): State<Arc<AppState>>) -> Json<SystemStatus> {
    Json(state.store.status().await)
}

/// GET /api/all/latest
///
/// One consistent snapshot: all three latest records and the status were
/// read at the same logical instant.
pub async fn all_latest(State(state): State<Arc<AppState>>) -> Json<AllLatest> {
    Json(state.store.all_latest().await)
}

/// GET /
///
/// Root endpoint with API documentation for anyone poking at the service.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Samudra Telemetry Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "vessel": {
                "POST /api/vessel/data": "Submit vessel data",
                "GET /api/vessel/latest": "Get latest vessel data",
                "GET /api/vessel/history?limit=100": "Get vessel history"
            },
            "buoy": {
                "POST /api/buoy/data": "Submit buoy data",
                "GET /api/buoy/latest": "Get latest buoy data",
                "GET /api/buoy/history?limit=100": "Get buoy history"
            },
            "base_station": {
                "POST /api/basestation/data": "Submit base station data",
                "GET /api/basestation/latest": "Get latest base station data",
                "GET /api/basestation/history?limit=100": "Get base station history"
            },
            "system": {
                "GET /api/all/latest": "Get all latest data",
                "GET /api/status": "Get system status",
                "GET /api/health": "Health check"
            },
            "websocket": {
                "GET /ws": "Real-time update stream"
            }
        }
    }))
}
