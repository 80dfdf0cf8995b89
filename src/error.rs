//! Error taxonomy for the export pipeline.

use thiserror::Error;

/// Errors an export can surface to the caller.
///
/// Scroll-cursor deletion failures are deliberately absent: cleanup is
/// advisory, so the session logs them and moves on.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Malformed request input, raised before any network activity.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Cluster unreachable (transport-level failure).
    #[error("cluster unreachable: {0}")]
    Connection(#[from] reqwest::Error),

    /// The cluster rejected the search request (malformed query string).
    #[error("search rejected by cluster: {0}")]
    Query(String),

    /// The scroll cursor lapsed between page requests. Unrecoverable for
    /// the session; the controller reports partial results.
    #[error("scroll cursor expired on the server")]
    ScrollExpired,

    /// Output sink could not be written. Fatal: unflushed data is lost.
    #[error("sink write failed: {0}")]
    SinkWrite(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
