//! Test helpers shared across LearnFlow relay crates.

pub mod llm;
pub mod web;

pub use llm::{FailingGenerator, FixedGenerator};
pub use web::{FailingSearchProvider, StubSearchProvider};
