//! Error types shared across the model and controller layers.
//!
//! Network and persistence failures are expected at runtime and are usually
//! logged and degraded at the call site rather than bubbled up to `main`.

use thiserror::Error;

/// Failures of the movie metadata API.
///
/// `Network` and `Status` together form the "network error" class: the
/// request did not produce a usable body. `NotFound` is only produced by the
/// detail lookup.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or undecodable body.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The API does not know the requested movie id.
    #[error("movie {0} not found")]
    NotFound(u64),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// HTTP status of the failed response, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ApiError::Network(e) => e.status(),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(reqwest::StatusCode::NOT_FOUND),
        }
    }
}

/// Failures of the durable key-value slot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize favorites: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored value under '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set; export a TMDB API read access token")]
    MissingToken(&'static str),

    #[error("{var} must be a whole number of milliseconds, got '{value}'")]
    InvalidDuration { var: &'static str, value: String },
}
