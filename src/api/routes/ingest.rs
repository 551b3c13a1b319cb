//! Ingest route
//!
//! POST /api/:category/data - accept one telemetry reading from a device.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::parse_category;
use crate::api::dto::IngestResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/:category/data
///
/// Stamps and stores the payload, then fans it out to all connected
/// dashboards. The broadcast happens after the store commit and outside
/// the store lock, so a slow subscriber can never delay the device's
/// acknowledgement.
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<IngestResponse>> {
    let category = parse_category(&category)?;

    let record = state.store.ingest(category, payload).await?;
    let timestamp = record.server_timestamp;

    state.hub.broadcast(category, record);

    Ok(Json(IngestResponse::accepted(timestamp)))
}
