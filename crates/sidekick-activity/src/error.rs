//! Error types for the activity relay.

use thiserror::Error;

/// Errors that can occur when talking to an [`ActivityRelay`](crate::ActivityRelay).
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay task has stopped and no longer accepts activity.
    #[error("Activity relay is closed")]
    Closed,

    /// The relay task panicked or was aborted.
    #[error("Activity relay task failed: {0}")]
    TaskFailed(String),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
