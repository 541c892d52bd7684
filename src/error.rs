//! Error types for campus-gestures
//!
//! Classification itself never fails: unmatched interactions degrade to "no
//! gesture". Errors exist only at the trace IO boundary.

use thiserror::Error;

/// Errors that can occur while parsing or replaying pointer traces
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse trace event: {0}")]
    ParseError(String),

    #[error("Non-finite coordinate in trace event: {0}")]
    NonFiniteCoordinate(String),

    #[error("Trace events out of order: {0}")]
    OutOfOrder(String),
}
