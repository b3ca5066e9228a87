//! Error types for the map engine core.
//!
//! Very little in the core can fail: command parsing degrades to a bare
//! command, out-of-world plane points are `None`, and stale visual targets
//! are the render sink's concern. What remains here are genuinely invalid
//! inputs that should stop construction, never the running engine.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level error type for the map engine core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A world grid must have at least one shard on each axis.
    #[error("world grid has no shards: {shards_x}x{shards_y}")]
    EmptyWorldGrid {
        /// Configured shard count on the x axis.
        shards_x: u16,
        /// Configured shard count on the y axis.
        shards_y: u16,
    },
}
