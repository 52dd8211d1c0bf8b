//! Error types for gate operations
//!
//! Failures here are remote-fetch failures only; the gates themselves
//! never surface an error to callers. A failed fetch degrades to the local
//! result with a possibly-stale marker.

use thiserror::Error;

/// Gate error types.
#[derive(Debug, Error)]
pub enum GateError {
    /// The remote permission or entitlement fetch failed
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The remote source is not reachable
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The remote response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;
