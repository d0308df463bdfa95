//! Query classification and prompt assembly for the relay.
//!
//! Everything in this crate is deterministic: extractors are total functions
//! over the query text, the catalog and navigation map are read-only tables
//! injected at startup, and the composer produces byte-identical prompts for
//! identical inputs.

mod catalog;
mod error;
mod extract;
mod fallback;
mod navigation;
mod prompt;

pub use catalog::{CourseCatalog, CourseInfo, CourseResource};
pub use error::ContextError;
pub use extract::{
    QueryFacts, ResourceType, detect_navigation_intent, extract_course_code, extract_query_facts,
    extract_resource_type, extract_semester, extract_unit, needs_web_search,
};
pub use fallback::fallback_reply;
pub use navigation::{NavEntry, NavigationMap, SemesterInfo};
pub use prompt::{CONVERSATION_WINDOW, ComposeInput, PromptComposer};
