//! Error types for dataset retrieval and parsing.

use thiserror::Error;

/// Failure to obtain the vehicle dataset.
///
/// Cloneable so that a memoized failure can be handed to every caller of
/// the store; once a load fails it stays failed for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The upstream resource answered with a non-success HTTP status.
    #[error("CSV load failed: HTTP {status} from {url}")]
    Status {
        /// Status code reported by the server
        status: u16,
        /// Requested location
        url: String,
    },

    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("CSV load failed: transport error: {0}")]
    Transport(String),

    /// Reading a local dataset file failed.
    #[error("CSV load failed: cannot read {path}: {message}")]
    Io {
        /// File that was read
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// The text could not be split into records.
    #[error("CSV parse failed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
