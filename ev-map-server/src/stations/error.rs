//! Station source error types.

use std::sync::Arc;

/// Errors that can occur while fetching station data.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: station feed rejected the request")]
    Unauthorized,

    /// Feed returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse station JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a local station file
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// A failure reported to several requests waiting on the same fetch
    #[error(transparent)]
    Shared(Arc<StationError>),
}
