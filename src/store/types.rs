//! Core data types for the telemetry store
//!
//! This module defines the types shared across the store and transport layers:
//! - `Category`: the three fixed telemetry sources
//! - `TelemetryRecord`: one accepted device payload plus its server timestamp
//! - `SystemStatus`: aggregate liveness projection
//! - `AllLatest`: composed snapshot of everything a dashboard needs at connect

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Telemetry source category
///
/// Closed set: every device in the system is one of these three.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Vessel-mounted tracker (ESP32)
    Vessel,
    /// Moored buoy (Raspberry Pi)
    Buoy,
    /// Shore-side relay station
    BaseStation,
}

impl Category {
    /// All categories, in a fixed order
    pub const ALL: [Category; 3] = [Category::Vessel, Category::Buoy, Category::BaseStation];

    /// Canonical lowercase name, matching the JSON field keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vessel => "vessel",
            Category::Buoy => "buoy",
            Category::BaseStation => "base_station",
        }
    }

    /// Index into per-category state arrays
    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Vessel => 0,
            Category::Buoy => 1,
            Category::BaseStation => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vessel" => Ok(Category::Vessel),
            "buoy" => Ok(Category::Buoy),
            // "basestation" is the URL spelling used by deployed devices
            "base_station" | "basestation" => Ok(Category::BaseStation),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Error for a category name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

/// A single accepted telemetry reading
///
/// The payload is opaque to the store: devices send whatever fields they
/// have, and the server only attaches the acceptance timestamp. Immutable
/// once accepted; subscribers and readers always get clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryRecord {
    /// When the server accepted this reading
    pub server_timestamp: DateTime<Utc>,
    /// Device-supplied fields, passed through untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl TelemetryRecord {
    /// Stamp a device payload with the acceptance time
    ///
    /// Any `server_timestamp` key the device sent is discarded; the server
    /// clock is authoritative.
    pub fn stamped(mut payload: Map<String, Value>, now: DateTime<Utc>) -> Self {
        payload.remove("server_timestamp");
        Self {
            server_timestamp: now,
            payload,
        }
    }

    /// Best-effort device identifier for logging
    ///
    /// Vessels report `id`, buoys `buoy_id`, base stations `station_id`.
    /// Absent or non-string values are tolerated.
    pub fn device_id(&self) -> Option<&str> {
        ["id", "buoy_id", "station_id"]
            .iter()
            .find_map(|key| self.payload.get(*key).and_then(Value::as_str))
    }
}

/// Aggregate system status projection
///
/// Field names match the wire format consumed by the dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStatus {
    pub vessel_online: bool,
    pub buoy_online: bool,
    pub base_station_online: bool,
    pub vessel_last_seen: Option<DateTime<Utc>>,
    pub buoy_last_seen: Option<DateTime<Utc>>,
    pub base_station_last_seen: Option<DateTime<Utc>>,
    /// Total accepted messages across all categories, monotonically increasing
    pub total_messages: u64,
}

impl SystemStatus {
    /// Online flag for one category
    pub fn online(&self, category: Category) -> bool {
        match category {
            Category::Vessel => self.vessel_online,
            Category::Buoy => self.buoy_online,
            Category::BaseStation => self.base_station_online,
        }
    }

    /// Last-seen timestamp for one category
    pub fn last_seen(&self, category: Category) -> Option<DateTime<Utc>> {
        match category {
            Category::Vessel => self.vessel_last_seen,
            Category::Buoy => self.buoy_last_seen,
            Category::BaseStation => self.base_station_last_seen,
        }
    }
}

/// Latest record per category plus system status, as of one instant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllLatest {
    pub vessel: Option<TelemetryRecord>,
    pub buoy: Option<TelemetryRecord>,
    pub base_station: Option<TelemetryRecord>,
    pub system_status: SystemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_accepts_url_spelling() {
        assert_eq!("basestation".parse::<Category>(), Ok(Category::BaseStation));
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!("drone".parse::<Category>().is_err());
        // Case-sensitive keys
        assert!("Vessel".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&Category::BaseStation).unwrap();
        assert_eq!(json, "\"base_station\"");
    }

    #[test]
    fn test_record_serializes_flat() {
        let now = Utc::now();
        let record = TelemetryRecord::stamped(payload(json!({"id": "V1", "lat": 12.9})), now);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "V1");
        assert_eq!(value["lat"], 12.9);
        assert!(value.get("server_timestamp").is_some());
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn test_stamp_overrides_device_clock() {
        let now = Utc::now();
        let record = TelemetryRecord::stamped(
            payload(json!({"id": "V1", "server_timestamp": "bogus"})),
            now,
        );

        assert_eq!(record.server_timestamp, now);
        assert!(record.payload.get("server_timestamp").is_none());
    }

    #[test]
    fn test_device_id_extraction() {
        let now = Utc::now();
        let vessel = TelemetryRecord::stamped(payload(json!({"id": "V1"})), now);
        let buoy = TelemetryRecord::stamped(payload(json!({"buoy_id": "B7"})), now);
        let relay = TelemetryRecord::stamped(payload(json!({"messages_relayed": 42})), now);

        assert_eq!(vessel.device_id(), Some("V1"));
        assert_eq!(buoy.device_id(), Some("B7"));
        assert_eq!(relay.device_id(), None);
    }
}
