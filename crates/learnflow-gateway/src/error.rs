//! Error types for the generation gateway.

use thiserror::Error;

/// Errors returned by the generation gateway. Every variant is recovered by
/// the orchestrator; none reaches the HTTP status line.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Provider returned a non-success status.
    #[error("provider returned status {code}: {message}")]
    Status { code: u16, message: String },
    /// Provider payload was missing the expected candidate structure.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// Transport-level failure (timeout, DNS, connection reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
