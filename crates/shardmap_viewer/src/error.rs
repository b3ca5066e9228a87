//! Error types for the viewer shell.

use thiserror::Error;

/// Result type alias using [`ViewerError`].
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Top-level error type for the viewer shell.
///
/// Poll failures are transient by design: they surface once as a
/// notification and the next scheduled poll simply tries again.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Engine-core construction error (e.g. a degenerate shard grid).
    #[error(transparent)]
    Core(#[from] shardmap_core::error::CoreError),

    /// Backend request failed (network or HTTP-level).
    #[error("backend request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        /// Path to the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        /// Path to the config file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The command endpoint rejected a command.
    #[error("command rejected by backend (HTTP {status})")]
    CommandRejected {
        /// HTTP status code of the rejection.
        status: u16,
    },

    /// The backend disables commands for this session (HTTP 405).
    #[error("command console is disabled by the backend")]
    CommandsDisabled,
}
