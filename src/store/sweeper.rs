//! Periodic liveness sweeper
//!
//! Background task that re-evaluates liveness on a fixed cadence so a
//! category goes offline even when no new traffic arrives. Runs for the
//! lifetime of the process; the returned handle is aborted at shutdown.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::engine::TelemetryStore;

/// Spawn the sweep loop
///
/// Each tick blocks on the store lock as needed - a busy store delays a
/// sweep but never skips one.
pub fn start(store: Arc<TelemetryStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a fresh start does
        // not sweep before any device had a chance to report.
        ticker.tick().await;

        tracing::info!(interval_secs = interval.as_secs(), "Liveness sweeper started");

        loop {
            ticker.tick().await;
            let transitions = store.sweep().await;
            if transitions > 0 {
                tracing::debug!(transitions, "Sweep completed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::store::Category;
    use serde_json::json;

    #[tokio::test]
    async fn test_sweeper_flips_silent_category() {
        // Zero threshold: any measurable silence counts as offline
        let store = Arc::new(TelemetryStore::new(&StoreConfig {
            liveness_threshold_secs: 0,
            ..Default::default()
        }));

        store
            .ingest(Category::Vessel, json!({"id": "V1"}))
            .await
            .unwrap();
        assert!(store.status().await.vessel_online);

        let handle = start(Arc::clone(&store), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!store.status().await.vessel_online);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_keeps_fresh_category_online() {
        // Default 30s threshold is far beyond this test's runtime
        let store = Arc::new(TelemetryStore::new(&StoreConfig::default()));
        let handle = start(Arc::clone(&store), Duration::from_millis(20));

        store
            .ingest(Category::Buoy, json!({"buoy_id": "B1"}))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(store.status().await.buoy_online);
        handle.abort();
    }
}
