//! Errors returned by host services.
//!
//! Blocks never surface these to the visitor. A failed host call degrades
//! the affected section to empty output and is logged by the caller.

use thiserror::Error;

/// Failure of a host data-access call.
#[derive(Debug, Error)]
pub enum HostError {
    /// The backing store could not be reached.
    #[error("host unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the query.
    #[error("query failed: {0}")]
    Query(String),

    /// A row came back in a shape the host could not decode.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Result alias for host calls.
pub type HostResult<T> = Result<T, HostError>;
