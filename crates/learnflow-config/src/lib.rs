//! Configuration schema and loading for the LearnFlow relay.
//!
//! This crate owns the relay config schema, JSON5 file loading, environment
//! variable overrides, and validation used by the server binary.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Configuration schema models.
pub use model::*;
