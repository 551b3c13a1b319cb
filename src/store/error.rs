//! Store error types

use thiserror::Error;

/// Errors surfaced by the telemetry store
///
/// Absence of data is never an error: reads for a category that has not
/// reported yet return `None`/empty.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Ingest payload is not a JSON object
    #[error("Validation error: {0}")]
    Validation(String),

    /// History limit must be positive
    #[error("Invalid history limit {0}: must be positive")]
    InvalidLimit(i64),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
