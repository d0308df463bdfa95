//! Deterministic prompt assembly.
//!
//! The composer accumulates ordered text sections from independent
//! predicate/fragment pairs. Section order is fixed (course, navigation,
//! resource search, web search, closing instructions, conversation window,
//! query) because downstream model behavior is sensitive to it. For
//! identical inputs the output is byte-identical.

use crate::catalog::{CourseCatalog, CourseInfo};
use crate::extract::QueryFacts;
use crate::navigation::NavigationMap;
use learnflow_protocol::{ChatMessage, SearchHit, SearchResults};
use std::fmt::Write;
use std::sync::Arc;

/// Number of trailing conversation messages included in the prompt.
pub const CONVERSATION_WINDOW: usize = 5;
/// Example entries shown per resource category.
const MAX_EXAMPLES_PER_CATEGORY: usize = 3;
/// Web search hits included in the prompt.
const MAX_WEB_RESULTS: usize = 3;

/// Fixed persona and grounding instructions, always the first section.
const BASE_INSTRUCTIONS: &str = "You are the LearnFlow assistant, a helpful guide for engineering \
students using the LearnFlow education platform. Answer questions about courses, study \
resources, and site navigation. Ground your answers in the context sections below when they are \
present.";

/// Fixed answer-shaping rules, always the last instruction section.
const CLOSING_INSTRUCTIONS: &str = "Guidelines: keep answers concise and friendly, prefer \
step-by-step directions for navigation questions, mention concrete resource paths when you know \
them, and say so plainly when you do not know something instead of guessing.";

/// Inputs to one composition. The caller owns the web search call; the
/// composer only formats whatever hits it is handed.
#[derive(Debug, Clone, Copy)]
pub struct ComposeInput<'a> {
    pub facts: &'a QueryFacts,
    pub query: &'a str,
    pub conversation: &'a [ChatMessage],
    pub search_results: &'a SearchResults,
    pub web_hits: &'a [SearchHit],
}

/// Builds the final prompt text from extracted facts and context fragments.
#[derive(Clone)]
pub struct PromptComposer {
    catalog: Arc<CourseCatalog>,
    navigation: Arc<NavigationMap>,
}

impl PromptComposer {
    /// Create a composer over the injected read-only tables.
    pub fn new(catalog: Arc<CourseCatalog>, navigation: Arc<NavigationMap>) -> Self {
        Self { catalog, navigation }
    }

    /// The catalog backing course sections.
    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// Compose the full prompt for one request.
    pub fn compose(&self, input: &ComposeInput<'_>) -> String {
        let mut sections = vec![BASE_INSTRUCTIONS.to_string()];

        if let Some(code) = input.facts.course_code.as_deref()
            && let Some(course) = self.catalog.get(code)
        {
            sections.push(course_section(course));
        }

        if input.facts.is_navigation_query {
            sections.push(self.navigation_section(input));
        }

        if !input.search_results.is_empty() {
            sections.push(resource_section(input.search_results));
        }

        if !input.web_hits.is_empty() {
            sections.push(web_section(input.web_hits));
        }

        sections.push(CLOSING_INSTRUCTIONS.to_string());
        sections.push(conversation_section(input.conversation));
        sections.push(format!("Current question: {}", input.query));

        sections.join("\n\n")
    }

    fn navigation_section(&self, input: &ComposeInput<'_>) -> String {
        let mut section = String::from(
            "The student is asking how to find something on the platform. Point them to the \
exact page or path.",
        );

        if let Some(semester) = input.facts.semester
            && let Some(info) = self.navigation.semester(semester)
        {
            let _ = write!(
                section,
                "\nSemester {} resources live at {}. Courses: {}.",
                semester,
                info.resources_path,
                info.courses.join(", ")
            );
        }

        let matches = self.navigation.matching_entries(input.query);
        if !matches.is_empty() {
            section.push_str("\nRelevant pages:");
            for entry in matches {
                if entry.description.is_empty() {
                    let _ = write!(section, "\n- {}: {}", entry.title, entry.path);
                } else {
                    let _ = write!(
                        section,
                        "\n- {}: {} ({})",
                        entry.title, entry.path, entry.description
                    );
                }
            }
        }

        section
    }
}

fn course_section(course: &CourseInfo) -> String {
    let mut section = format!(
        "The student is asking about {} ({}). {}\nTopics covered: {}.",
        course.code,
        course.name,
        course.description,
        course.topics.join(", ")
    );
    if !course.resources.is_empty() {
        section.push_str("\nCourse resources:");
        for resource in &course.resources {
            let _ = write!(section, "\n- {}: {}", resource.name, resource.path);
        }
    }
    section
}

fn resource_section(results: &SearchResults) -> String {
    let mut section = format!(
        "Local resource search found {} matches (assignments: {}, notes: {}, lab manuals: {}, \
downloads: {}).",
        results.total_results,
        results.assignments.len(),
        results.notes.len(),
        results.lab_manuals.len(),
        results.downloads.len()
    );

    for (label, entries) in [
        ("Assignments", &results.assignments),
        ("Notes", &results.notes),
        ("Lab manuals", &results.lab_manuals),
    ] {
        if entries.is_empty() {
            continue;
        }
        let _ = write!(section, "\n{}:", label);
        for entry in entries.iter().take(MAX_EXAMPLES_PER_CATEGORY) {
            let _ = write!(section, "\n- {} ({})", entry.name, entry.path);
        }
    }

    if !results.downloads.is_empty() {
        section.push_str("\nDownloads:");
        for entry in results.downloads.iter().take(MAX_EXAMPLES_PER_CATEGORY) {
            let _ = write!(section, "\n- {}: {}", entry.title, entry.url);
        }
    }

    section
}

fn web_section(hits: &[SearchHit]) -> String {
    let mut section = String::from("Web search context:");
    for (index, hit) in hits.iter().take(MAX_WEB_RESULTS).enumerate() {
        let _ = write!(
            section,
            "\n{}. {}\n   {}\n   {}",
            index + 1,
            hit.title,
            hit.url,
            hit.snippet
        );
    }
    section
}

fn conversation_section(conversation: &[ChatMessage]) -> String {
    let start = conversation.len().saturating_sub(CONVERSATION_WINDOW);
    let window = conversation[start..]
        .iter()
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("Recent conversation:\n{}", window)
}
