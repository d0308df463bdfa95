/// Errors returned by the local adapters (file scan, web search).
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Scan target does not exist or is not a directory.
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// Upstream search call failed (bad status, transport fault, bad payload).
    #[error("search failed: {0}")]
    SearchFailed(String),
}
