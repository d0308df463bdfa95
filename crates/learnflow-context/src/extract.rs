//! Pattern-matching extractors over the user query.
//!
//! Each extractor is a total function from query text to a structured fact
//! or `None`; there are no side effects and no failure modes beyond
//! "no match".

use crate::catalog::CourseCatalog;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Resource kind referenced by the query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Pdf,
    Notes,
    Manual,
    Assignment,
    Lab,
    Download,
}

impl ResourceType {
    /// Lowercase label used in logs and prompt text.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Pdf => "pdf",
            ResourceType::Notes => "notes",
            ResourceType::Manual => "manual",
            ResourceType::Assignment => "assignment",
            ResourceType::Lab => "lab",
            ResourceType::Download => "download",
        }
    }
}

/// Structured facts derived from one query. Derived fresh per request; no
/// identity beyond the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFacts {
    pub course_code: Option<String>,
    pub unit: Option<u32>,
    pub semester: Option<u32>,
    pub resource_type: Option<ResourceType>,
    pub is_navigation_query: bool,
    pub needs_web_search: bool,
}

/// Keywords that flag a navigation-style question.
const NAVIGATION_KEYWORDS: &[&str] = &[
    "where",
    "find",
    "locate",
    "show me",
    "how to access",
    "resources",
    "materials",
    "lectures",
    "notes",
    "semester",
];

/// Keywords that flag a need for fresh external information.
const RECENCY_KEYWORDS: &[&str] = &[
    "latest", "recent", "today", "now", "current", "news", "update",
];

/// Keywords that mark a query as platform-internal.
const PLATFORM_KEYWORDS: &[&str] = &[
    "learnflow",
    "course",
    "assignment",
    "lecture",
    "professor",
    "class",
];

fn course_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b([a-z]{2,3})\s*([0-9]{3})\b").expect("course code regex"))
}

fn semester_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([1-9])(?:st|nd|rd|th)?[\s-]*sem(?:ester)?\b").expect("semester regex")
    })
}

fn unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bunit\s*([0-9]+)\b").expect("unit regex"))
}

fn resource_type_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(pdfs?|notes?|manuals?|assignments?|labs?|downloads?)\b")
            .expect("resource type regex")
    })
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b20[0-9]{2}\b").expect("year regex"))
}

/// Run every extractor against the query and bundle the results.
pub fn extract_query_facts(query: &str, catalog: &CourseCatalog) -> QueryFacts {
    QueryFacts {
        course_code: extract_course_code(query, catalog),
        unit: extract_unit(query),
        semester: extract_semester(query),
        resource_type: extract_resource_type(query),
        is_navigation_query: detect_navigation_intent(query),
        needs_web_search: needs_web_search(query),
    }
}

/// Extract a known course code: 2-3 letters, optional whitespace, exactly
/// three digits. Codes absent from the catalog resolve to no course.
pub fn extract_course_code(query: &str, catalog: &CourseCatalog) -> Option<String> {
    for capture in course_code_regex().captures_iter(query) {
        let code = format!(
            "{}{}",
            capture[1].to_uppercase(),
            &capture[2]
        );
        if catalog.contains(&code) {
            return Some(code);
        }
    }
    None
}

/// Extract a semester number: digit 1-9 with an optional ordinal suffix
/// followed by "sem" or "semester".
pub fn extract_semester(query: &str) -> Option<u32> {
    semester_regex()
        .captures(query)
        .and_then(|capture| capture[1].parse().ok())
}

/// Extract a unit number: the word "unit" followed by an integer.
pub fn extract_unit(query: &str) -> Option<u32> {
    unit_regex()
        .captures(query)
        .and_then(|capture| capture[1].parse().ok())
}

/// Extract the referenced resource type from the fixed keyword set.
pub fn extract_resource_type(query: &str) -> Option<ResourceType> {
    let capture = resource_type_regex().captures(query)?;
    let keyword = capture[1].to_lowercase();
    let resource_type = if keyword.starts_with("pdf") {
        ResourceType::Pdf
    } else if keyword.starts_with("note") {
        ResourceType::Notes
    } else if keyword.starts_with("manual") {
        ResourceType::Manual
    } else if keyword.starts_with("assignment") {
        ResourceType::Assignment
    } else if keyword.starts_with("lab") {
        ResourceType::Lab
    } else {
        ResourceType::Download
    };
    Some(resource_type)
}

/// True when the query contains any navigation keyword.
pub fn detect_navigation_intent(query: &str) -> bool {
    let query = query.to_lowercase();
    NAVIGATION_KEYWORDS
        .iter()
        .any(|keyword| query.contains(keyword))
}

/// True when the query mentions recency, or references nothing
/// platform-internal. Deliberately permissive: most generic questions
/// trigger an external search.
pub fn needs_web_search(query: &str) -> bool {
    let lowered = query.to_lowercase();
    if RECENCY_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
        || year_regex().is_match(&lowered)
    {
        return true;
    }
    !PLATFORM_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseCatalog;
    use pretty_assertions::assert_eq;

    fn catalog() -> CourseCatalog {
        CourseCatalog::default_catalog()
    }

    #[test]
    fn course_code_is_uppercased_and_validated() {
        assert_eq!(
            extract_course_code("tell me about chb 101 please", &catalog()),
            Some("CHB101".to_string())
        );
        assert_eq!(
            extract_course_code("tell me about CHB101", &catalog()),
            Some("CHB101".to_string())
        );
    }

    #[test]
    fn unknown_course_code_resolves_to_none() {
        assert_eq!(extract_course_code("what is zzz 999?", &catalog()), None);
    }

    #[test]
    fn four_digit_codes_do_not_match() {
        assert_eq!(extract_course_code("room chb 1011", &catalog()), None);
    }

    #[test]
    fn semester_matches_ordinal_and_bare_forms() {
        assert_eq!(extract_semester("notes for 3rd semester"), Some(3));
        assert_eq!(extract_semester("notes for 3 sem"), Some(3));
        assert_eq!(extract_semester("1st semester syllabus"), Some(1));
        assert_eq!(extract_semester("no semester here at 0 sem"), None);
    }

    #[test]
    fn unit_matches_integer() {
        assert_eq!(extract_unit("explain unit 4"), Some(4));
        assert_eq!(extract_unit("explain unit four"), None);
    }

    #[test]
    fn resource_type_matches_keyword_set() {
        assert_eq!(extract_resource_type("any lab manuals?"), Some(ResourceType::Lab));
        assert_eq!(
            extract_resource_type("send the assignment"),
            Some(ResourceType::Assignment)
        );
        assert_eq!(extract_resource_type("share the pdf"), Some(ResourceType::Pdf));
        assert_eq!(extract_resource_type("explain recursion"), None);
    }

    #[test]
    fn navigation_intent_detects_keywords() {
        assert!(detect_navigation_intent("where can I find the notes"));
        assert!(detect_navigation_intent("show me the materials"));
        assert!(!detect_navigation_intent("explain covalent bonds"));
    }

    #[test]
    fn web_search_triggers_on_recency() {
        assert!(needs_web_search("latest news about the course"));
        assert!(needs_web_search("exam dates 2026"));
    }

    #[test]
    fn web_search_defaults_true_for_non_platform_queries() {
        assert!(needs_web_search("how do jet engines work"));
        assert!(!needs_web_search("when is the assignment due"));
        assert!(!needs_web_search("learnflow login help"));
    }

    #[test]
    fn facts_bundle_everything() {
        let facts = extract_query_facts("where are the chb 101 notes for 3rd sem?", &catalog());
        assert_eq!(facts.course_code.as_deref(), Some("CHB101"));
        assert_eq!(facts.semester, Some(3));
        assert_eq!(facts.resource_type, Some(ResourceType::Notes));
        assert!(facts.is_navigation_query);
    }
}
