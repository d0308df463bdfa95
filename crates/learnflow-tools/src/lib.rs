//! Local adapters for the relay: resource index, file scanner, and web
//! search providers.

mod index;
mod scan;
mod web;

/// Resource index built once at startup.
pub use index::ResourceIndex;
/// Bounded recursive file scanner for admin commands.
pub use scan::{FileScanner, MAX_SCAN_FILES};
/// Web search provider interface and implementations.
pub use web::{
    DEFAULT_SEARCH_LIMIT, GoogleSearchProvider, SearchProvider, SimulatedSearchProvider,
    provider_from_config,
};
