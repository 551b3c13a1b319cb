//! WebSocket message types
//!
//! Wire formats for the dashboard connection. Dashboards receive every
//! accepted record tagged with its category; the only requests they make
//! are the connect-time state pull and keepalive pings.

use serde::{Deserialize, Serialize};

use crate::store::{AllLatest, Category, TelemetryRecord};

/// Messages sent from dashboard clients to the server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// One-shot pull of all current data (used at connect time; the hub
    /// never replays history on its own)
    RequestAllData,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from the server to dashboard clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique subscriber identifier
        subscriber_id: String,
    },
    /// A telemetry record was accepted
    Update {
        /// Which category it belongs to
        category: Category,
        /// The accepted record, server timestamp included
        data: TelemetryRecord,
    },
    /// Response to `request_all_data`
    AllData(AllLatest),
    /// Pong response to ping
    Pong,
    /// Error message
    Error { message: String },
}

/// An accepted record fanned out through the hub
#[derive(Debug, Clone)]
pub struct TelemetryEvent {
    pub category: Category,
    pub record: TelemetryRecord,
}

impl TelemetryEvent {
    pub fn new(category: Category, record: TelemetryRecord) -> Self {
        Self { category, record }
    }

    /// The wire message for this event
    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::Update {
            category: self.category,
            data: self.record.clone(),
        }
    }
}
