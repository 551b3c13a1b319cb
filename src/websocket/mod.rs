//! Real-time telemetry streaming
//!
//! Pushes every accepted record to connected dashboards over WebSocket.
//!
//! ## Architecture
//!
//! - **SubscriptionHub**: subscriber registry and broadcast fan-out
//! - **Handler**: WebSocket upgrade and connection lifecycle
//! - **Messages**: client and server wire formats
//!
//! ## Usage
//!
//! Dashboards connect to `/ws`, receive a `connected` message, then get an
//! `update` for each accepted record. Current state is pulled once at
//! connect time:
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8000/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'request_all_data'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'update') console.log(msg.category, msg.data);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{HubConfig, HubError, SubscriberId, Subscription, SubscriptionHub};
pub use messages::{ClientMessage, ServerMessage, TelemetryEvent};
