//! Subscription hub
//!
//! Registry of live dashboard subscribers and the fan-out path for accepted
//! telemetry. Delivery rides a tokio broadcast channel: every subscriber
//! holds its own receiver cursor into a bounded event ring, so a slow or
//! stalled subscriber lags and loses its own oldest events without ever
//! blocking the ingest path or its peers.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::messages::TelemetryEvent;
use crate::store::{Category, TelemetryRecord};

/// Unique identifier for a subscriber
pub type SubscriberId = String;

/// Configuration for the subscription hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent subscribers
    pub max_subscribers: usize,
    /// Events buffered per subscriber before the oldest are dropped
    pub event_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_subscribers: 1000,
            event_capacity: 256,
        }
    }
}

/// Handle returned to a registered subscriber
///
/// Holds the event receiver; dropping it ends delivery, but the owner
/// should still call [`SubscriptionHub::unsubscribe`] to release the
/// registry slot.
pub struct Subscription {
    /// Subscriber identifier, used to unsubscribe
    pub id: SubscriberId,
    /// Stream of accepted telemetry events
    pub events: broadcast::Receiver<TelemetryEvent>,
}

/// Manages subscriber registration and telemetry fan-out
pub struct SubscriptionHub {
    subscribers: Arc<RwLock<HashSet<SubscriberId>>>,
    event_tx: broadcast::Sender<TelemetryEvent>,
    config: HubConfig,
}

impl SubscriptionHub {
    /// Create a new hub
    pub fn new(config: HubConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity);
        Self {
            subscribers: Arc::new(RwLock::new(HashSet::new())),
            event_tx,
            config,
        }
    }

    /// Register a new subscriber
    ///
    /// Fails if the subscriber limit has been reached. The returned
    /// subscription starts receiving events broadcast after this call;
    /// there is no history replay - callers wanting current state pull it
    /// from the store at connect time.
    pub async fn subscribe(&self) -> Result<Subscription, HubError> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.len() >= self.config.max_subscribers {
            return Err(HubError::TooManySubscribers(self.config.max_subscribers));
        }

        let id = Uuid::new_v4().to_string();
        subscribers.insert(id.clone());
        drop(subscribers);

        tracing::info!(subscriber_id = %id, "Subscriber connected");
        Ok(Subscription {
            id,
            events: self.event_tx.subscribe(),
        })
    }

    /// Remove a subscriber; idempotent and safe during an in-flight broadcast
    pub async fn unsubscribe(&self, id: &str) {
        if self.subscribers.write().await.remove(id) {
            tracing::info!(subscriber_id = %id, "Subscriber disconnected");
        }
    }

    /// Fan out an accepted record to all current subscribers
    ///
    /// Never blocks: the send is a ring-buffer write, and each lagging
    /// subscriber independently drops its own oldest events. Returns the
    /// number of receivers the event reached.
    pub fn broadcast(&self, category: Category, record: TelemetryRecord) -> usize {
        let reached = self
            .event_tx
            .send(TelemetryEvent::new(category, record))
            .unwrap_or(0);

        tracing::trace!(category = %category, subscribers = reached, "Broadcast telemetry");
        reached
    }

    /// Number of registered subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

/// Errors that can occur in the subscription hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many subscribers (limit: {0})")]
    TooManySubscribers(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};
    use tokio::sync::broadcast::error::TryRecvError;

    fn record(fields: Value) -> TelemetryRecord {
        let Value::Object(map) = fields else {
            panic!("expected object")
        };
        TelemetryRecord::stamped(map, Utc::now())
    }

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.max_subscribers, 1000);
        assert_eq!(config.event_capacity, 256);
    }

    #[tokio::test]
    async fn test_subscribe_unsubscribe() {
        let hub = SubscriptionHub::new(HubConfig::default());

        let sub = hub.subscribe().await.unwrap();
        assert_eq!(hub.subscriber_count().await, 1);

        hub.unsubscribe(&sub.id).await;
        assert_eq!(hub.subscriber_count().await, 0);

        // Idempotent
        hub.unsubscribe(&sub.id).await;
        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_subscriber_limit() {
        let hub = SubscriptionHub::new(HubConfig {
            max_subscribers: 2,
            event_capacity: 16,
        });

        let _a = hub.subscribe().await.unwrap();
        let _b = hub.subscribe().await.unwrap();
        let result = hub.subscribe().await;

        assert!(matches!(result, Err(HubError::TooManySubscribers(2))));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_subscribers() {
        let hub = SubscriptionHub::new(HubConfig::default());
        let mut a = hub.subscribe().await.unwrap();
        let mut b = hub.subscribe().await.unwrap();

        let reached = hub.broadcast(Category::Vessel, record(json!({"id": "V1"})));
        assert_eq!(reached, 2);

        let event = a.events.try_recv().unwrap();
        assert_eq!(event.category, Category::Vessel);
        assert_eq!(event.record.payload["id"], json!("V1"));

        let event = b.events.try_recv().unwrap();
        assert_eq!(event.category, Category::Vessel);
    }

    #[tokio::test]
    async fn test_no_replay_for_late_subscriber() {
        let hub = SubscriptionHub::new(HubConfig::default());
        hub.broadcast(Category::Buoy, record(json!({"buoy_id": "B1"})));

        let mut late = hub.subscribe().await.unwrap();
        assert!(matches!(late.events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_slow_subscriber_drops_oldest_only() {
        let hub = SubscriptionHub::new(HubConfig {
            max_subscribers: 10,
            event_capacity: 4,
        });
        let mut slow = hub.subscribe().await.unwrap();
        let mut fast = hub.subscribe().await.unwrap();

        // Fast subscriber keeps up
        for seq in 0..10 {
            hub.broadcast(Category::Vessel, record(json!({"seq": seq})));
            let event = fast.events.try_recv().unwrap();
            assert_eq!(event.record.payload["seq"], json!(seq));
        }

        // Slow subscriber never drained: it lags, losing the oldest events,
        // then catches up on the retained tail
        match slow.events.try_recv() {
            Err(TryRecvError::Lagged(missed)) => assert!(missed > 0),
            other => panic!("expected lag, got {:?}", other),
        }
        let event = slow.events.try_recv().unwrap();
        assert!(event.record.payload["seq"].as_i64().unwrap() >= 6);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_subscribers() {
        let hub = SubscriptionHub::new(HubConfig::default());
        // Must not error or block
        assert_eq!(hub.broadcast(Category::BaseStation, record(json!({}))), 0);
    }
}
