//! Error types for loading context tables from disk.

use thiserror::Error;

/// Errors returned while loading the course catalog or navigation map.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Reading a table file failed.
    #[error("failed to read table: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Decoding a table file failed.
    #[error("failed to decode table: {0}")]
    DecodeFailed(#[from] serde_json::Error),
}
