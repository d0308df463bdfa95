//! Read-only course catalog injected at startup.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Named resource attached to a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseResource {
    pub name: String,
    pub path: String,
}

/// Static course metadata, keyed by course code in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseInfo {
    pub code: String,
    pub name: String,
    pub description: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub resources: Vec<CourseResource>,
}

/// Lookup table of known courses. Read-only at request time; built once at
/// startup from the built-in table or a JSON file.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: HashMap<String, CourseInfo>,
}

impl CourseCatalog {
    /// Build a catalog from a course list, keyed by uppercased code.
    pub fn from_courses(courses: Vec<CourseInfo>) -> Self {
        let courses = courses
            .into_iter()
            .map(|course| (course.code.to_uppercase(), course))
            .collect();
        Self { courses }
    }

    /// Load a catalog from a JSON file containing a course array.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let contents = fs::read_to_string(path)?;
        let courses: Vec<CourseInfo> = serde_json::from_str(&contents)?;
        Ok(Self::from_courses(courses))
    }

    /// Look up a course by its normalized code.
    pub fn get(&self, code: &str) -> Option<&CourseInfo> {
        self.courses.get(&code.to_uppercase())
    }

    /// True when the code is present in the catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.courses.contains_key(&code.to_uppercase())
    }

    /// Number of known courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// True when the catalog holds no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Built-in catalog used when no courses file is configured.
    pub fn default_catalog() -> Self {
        let courses = vec![
            CourseInfo {
                code: "CHB101".to_string(),
                name: "Engineering Chemistry".to_string(),
                description: "Foundations of chemistry for first-year engineering students."
                    .to_string(),
                topics: vec![
                    "Atomic structure".to_string(),
                    "Chemical bonding".to_string(),
                    "Electrochemistry".to_string(),
                    "Polymers".to_string(),
                    "Water treatment".to_string(),
                ],
                resources: vec![CourseResource {
                    name: "Unit notes".to_string(),
                    path: "/resources/notes/chb101".to_string(),
                }],
            },
            CourseInfo {
                code: "MAB101".to_string(),
                name: "Engineering Mathematics I".to_string(),
                description: "Calculus and linear algebra for engineering.".to_string(),
                topics: vec![
                    "Limits and continuity".to_string(),
                    "Differentiation".to_string(),
                    "Integration".to_string(),
                    "Matrices".to_string(),
                ],
                resources: Vec::new(),
            },
            CourseInfo {
                code: "PHB101".to_string(),
                name: "Engineering Physics".to_string(),
                description: "Mechanics, optics, and modern physics.".to_string(),
                topics: vec![
                    "Oscillations and waves".to_string(),
                    "Interference and diffraction".to_string(),
                    "Quantum mechanics basics".to_string(),
                ],
                resources: Vec::new(),
            },
            CourseInfo {
                code: "CSB201".to_string(),
                name: "Data Structures".to_string(),
                description: "Core data structures and their analysis.".to_string(),
                topics: vec![
                    "Arrays and linked lists".to_string(),
                    "Stacks and queues".to_string(),
                    "Trees".to_string(),
                    "Graphs".to_string(),
                    "Hashing".to_string(),
                ],
                resources: vec![CourseResource {
                    name: "Lab manual".to_string(),
                    path: "/resources/lab-manuals/csb201".to_string(),
                }],
            },
            CourseInfo {
                code: "ESB101".to_string(),
                name: "Basic Electrical Engineering".to_string(),
                description: "DC and AC circuits, machines, and measurements.".to_string(),
                topics: vec![
                    "Circuit laws".to_string(),
                    "AC fundamentals".to_string(),
                    "Transformers".to_string(),
                ],
                resources: Vec::new(),
            },
            CourseInfo {
                code: "HUB101".to_string(),
                name: "Professional Communication".to_string(),
                description: "Written and spoken communication for engineers.".to_string(),
                topics: vec![
                    "Technical writing".to_string(),
                    "Presentations".to_string(),
                    "Group discussion".to_string(),
                ],
                resources: Vec::new(),
            },
        ];
        Self::from_courses(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = CourseCatalog::default_catalog();
        assert!(catalog.contains("chb101"));
        assert_eq!(
            catalog.get("chb101").map(|course| course.name.as_str()),
            Some("Engineering Chemistry")
        );
    }

    #[test]
    fn load_from_path_reads_course_array() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("courses.json");
        std::fs::write(
            &path,
            r#"[{
                "code": "xyz123",
                "name": "Test Course",
                "description": "d",
                "topics": ["t1"]
            }]"#,
        )
        .expect("write");

        let catalog = CourseCatalog::load_from_path(&path).expect("catalog");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("XYZ123"));
    }
}
