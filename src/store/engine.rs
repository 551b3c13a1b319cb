//! Telemetry store
//!
//! The shared core of the service: accepts writes from the device-facing
//! ingest path, keeps a bounded history and latest snapshot per category,
//! owns the liveness tracker, and hands out consistent read snapshots.
//!
//! All mutations and multi-field reads go through one `RwLock` over the
//! whole inner state. Categories are independent, but the composed
//! `status()`/`all_latest()` reads need a single consistency boundary and
//! the workload is light, so a coarse lock is the right trade.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use super::error::{StoreError, StoreResult};
use super::history::BoundedHistory;
use super::liveness::{LivenessState, LivenessTracker};
use super::types::{AllLatest, Category, SystemStatus, TelemetryRecord};
use crate::config::StoreConfig;

/// Per-category aggregate state
#[derive(Debug, Clone)]
struct CategoryState {
    latest: Option<TelemetryRecord>,
    history: BoundedHistory<TelemetryRecord>,
    liveness: LivenessState,
}

impl CategoryState {
    fn new(capacity: usize) -> Self {
        Self {
            latest: None,
            history: BoundedHistory::new(capacity),
            liveness: LivenessState::Unseen,
        }
    }
}

/// Everything behind the store lock
#[derive(Debug)]
struct StoreInner {
    categories: [CategoryState; 3],
    total_messages: u64,
}

impl StoreInner {
    fn category(&self, category: Category) -> &CategoryState {
        &self.categories[category.index()]
    }

    fn category_mut(&mut self, category: Category) -> &mut CategoryState {
        &mut self.categories[category.index()]
    }

    fn status(&self) -> SystemStatus {
        SystemStatus {
            vessel_online: self.category(Category::Vessel).liveness.is_online(),
            buoy_online: self.category(Category::Buoy).liveness.is_online(),
            base_station_online: self.category(Category::BaseStation).liveness.is_online(),
            vessel_last_seen: self.category(Category::Vessel).liveness.last_seen(),
            buoy_last_seen: self.category(Category::Buoy).liveness.last_seen(),
            base_station_last_seen: self.category(Category::BaseStation).liveness.last_seen(),
            total_messages: self.total_messages,
        }
    }
}

/// Concurrent telemetry store shared by producers, readers, and the sweeper
pub struct TelemetryStore {
    inner: RwLock<StoreInner>,
    tracker: LivenessTracker,
}

impl TelemetryStore {
    /// Create an empty store from configuration
    pub fn new(config: &StoreConfig) -> Self {
        let capacity = config.history_capacity;
        Self {
            inner: RwLock::new(StoreInner {
                categories: [
                    CategoryState::new(capacity),
                    CategoryState::new(capacity),
                    CategoryState::new(capacity),
                ],
                total_messages: 0,
            }),
            tracker: LivenessTracker::new(config.liveness_threshold_secs),
        }
    }

    /// Accept one telemetry payload for a category
    ///
    /// Stamps the payload with the current server time, appends it to the
    /// category history (evicting the oldest at capacity), replaces the
    /// latest snapshot, marks the category online, and bumps the message
    /// counter - all under one write-lock acquisition, so readers never
    /// observe a torn update.
    ///
    /// Returns the stamped record for the caller to echo and broadcast.
    /// Rejects non-object payloads before touching any state.
    pub async fn ingest(
        &self,
        category: Category,
        payload: Value,
    ) -> StoreResult<TelemetryRecord> {
        self.ingest_at(category, payload, Utc::now()).await
    }

    /// Ingest with an explicit acceptance time
    pub async fn ingest_at(
        &self,
        category: Category,
        payload: Value,
        now: DateTime<Utc>,
    ) -> StoreResult<TelemetryRecord> {
        let fields = match payload {
            Value::Object(fields) => fields,
            other => {
                return Err(StoreError::Validation(format!(
                    "payload must be a JSON object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let record = TelemetryRecord::stamped(fields, now);

        let mut inner = self.inner.write().await;
        let state = inner.category_mut(category);
        state.history.push(record.clone());
        state.latest = Some(record.clone());
        self.tracker.mark_seen(&mut state.liveness, now);
        inner.total_messages += 1;
        let total = inner.total_messages;
        drop(inner);

        tracing::info!(
            category = %category,
            device_id = record.device_id().unwrap_or("unknown"),
            total_messages = total,
            "Telemetry accepted"
        );

        Ok(record)
    }

    /// Latest accepted record for a category, if any
    pub async fn latest(&self, category: Category) -> Option<TelemetryRecord> {
        self.inner.read().await.category(category).latest.clone()
    }

    /// The most recent records for a category, oldest first
    ///
    /// `limit` defaults to 100 when unspecified; non-positive limits are
    /// rejected. The effective maximum is the history capacity.
    pub async fn history(
        &self,
        category: Category,
        limit: Option<i64>,
    ) -> StoreResult<Vec<TelemetryRecord>> {
        let limit = match limit {
            None => crate::config::DEFAULT_HISTORY_LIMIT,
            Some(n) if n > 0 => n as usize,
            Some(n) => return Err(StoreError::InvalidLimit(n)),
        };

        Ok(self.inner.read().await.category(category).history.recent(limit))
    }

    /// Consistent snapshot of all online flags, last-seen times, and the counter
    pub async fn status(&self) -> SystemStatus {
        self.inner.read().await.status()
    }

    /// Latest record per category plus status, all as of one instant
    pub async fn all_latest(&self) -> AllLatest {
        let inner = self.inner.read().await;
        AllLatest {
            vessel: inner.category(Category::Vessel).latest.clone(),
            buoy: inner.category(Category::Buoy).latest.clone(),
            base_station: inner.category(Category::BaseStation).latest.clone(),
            system_status: inner.status(),
        }
    }

    /// Re-evaluate liveness for every category against the current time
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    /// Re-evaluate liveness against an explicit time
    ///
    /// Flips Online -> Offline for categories whose last record is older
    /// than the threshold. Idempotent. Returns how many flipped.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut inner = self.inner.write().await;
        let mut transitions = 0;
        for category in Category::ALL {
            let state = inner.category_mut(category);
            if self.tracker.sweep(&mut state.liveness, now) {
                transitions += 1;
                tracing::info!(
                    category = %category,
                    last_seen = ?state.liveness.last_seen(),
                    "Category went offline"
                );
            }
        }
        transitions
    }

    /// Total accepted messages across all categories
    pub async fn total_messages(&self) -> u64 {
        self.inner.read().await.total_messages
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
