//! Per-category liveness tracking
//!
//! A category is online while records keep arriving within the threshold
//! window. Going online happens eagerly on ingest; going offline happens
//! lazily, when a sweep observes that the threshold has elapsed. Reads never
//! recompute freshness themselves - they report whatever the last ingest or
//! sweep established.

use chrono::{DateTime, Duration, Utc};

/// Liveness state machine for one category
///
/// `Unseen -> Online <-> Offline`. Unseen and Offline both report
/// not-online, but Unseen has no last-seen timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LivenessState {
    /// No record ever accepted
    #[default]
    Unseen,
    /// A record arrived within the threshold of the last evaluation
    Online { last_seen: DateTime<Utc> },
    /// The threshold elapsed with no new record
    Offline { last_seen: DateTime<Utc> },
}

impl LivenessState {
    /// Whether this state reports as online
    pub fn is_online(&self) -> bool {
        matches!(self, LivenessState::Online { .. })
    }

    /// Timestamp of the last accepted record, if any
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        match self {
            LivenessState::Unseen => None,
            LivenessState::Online { last_seen } | LivenessState::Offline { last_seen } => {
                Some(*last_seen)
            }
        }
    }
}

/// Applies the liveness threshold to category states
#[derive(Debug, Clone, Copy)]
pub struct LivenessTracker {
    threshold: Duration,
}

impl LivenessTracker {
    /// Tracker with the given offline threshold in seconds
    pub fn new(threshold_secs: u64) -> Self {
        Self {
            threshold: Duration::seconds(threshold_secs as i64),
        }
    }

    /// The configured offline threshold
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Record an accepted ingest: any state transitions to Online immediately
    pub fn mark_seen(&self, state: &mut LivenessState, now: DateTime<Utc>) {
        *state = LivenessState::Online { last_seen: now };
    }

    /// Re-evaluate one state against the threshold
    ///
    /// Returns true if the state flipped Online -> Offline. Idempotent;
    /// Unseen and Offline are untouched.
    pub fn sweep(&self, state: &mut LivenessState, now: DateTime<Utc>) -> bool {
        if let LivenessState::Online { last_seen } = *state {
            if now - last_seen > self.threshold {
                *state = LivenessState::Offline { last_seen };
                return true;
            }
        }
        false
    }
}

impl Default for LivenessTracker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LIVENESS_THRESHOLD_SECS)
    }
}
