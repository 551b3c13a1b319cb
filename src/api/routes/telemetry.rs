//! Telemetry read routes
//!
//! - GET /api/:category/latest - most recent record, or null if unseen
//! - GET /api/:category/history?limit=N - recent records, oldest first

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::parse_category;
use crate::api::dto::HistoryParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::TelemetryRecord;

/// GET /api/:category/latest
///
/// A category that has never reported returns JSON `null` - absence is a
/// normal state, not an error.
pub async fn latest(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> ApiResult<Json<Option<TelemetryRecord>>> {
    let category = parse_category(&category)?;
    Ok(Json(state.store.latest(category).await))
}

/// GET /api/:category/history?limit=N
///
/// Defaults to the last 100 records; a non-positive limit is rejected.
pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<TelemetryRecord>>> {
    let category = parse_category(&category)?;
    let records = state.store.history(category, params.limit).await?;
    Ok(Json(records))
}
