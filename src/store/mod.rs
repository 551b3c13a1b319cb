//! Telemetry store core
//!
//! The concurrent heart of the service:
//!
//! - [`TelemetryStore`]: bounded history + latest snapshot per category,
//!   message counter, and liveness, behind one consistency boundary
//! - [`BoundedHistory`]: fixed-capacity FIFO buffer
//! - [`LivenessTracker`]: online/offline evaluation against the threshold
//! - [`sweeper`]: the periodic background re-evaluation loop
//!
//! The transport layer calls into this module; nothing in here knows about
//! HTTP or WebSocket.

pub mod engine;
pub mod error;
pub mod history;
pub mod liveness;
pub mod sweeper;
pub mod types;

pub use engine::TelemetryStore;
pub use error::{StoreError, StoreResult};
pub use history::BoundedHistory;
pub use liveness::{LivenessState, LivenessTracker};
pub use types::{AllLatest, Category, SystemStatus, TelemetryRecord, UnknownCategory};
