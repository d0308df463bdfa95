//! Static navigation table for the platform website.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Keyword-matched navigation entry (page, department, or resource area).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavEntry {
    /// Lowercase keywords that activate the entry.
    pub keywords: Vec<String>,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
}

/// Per-semester resource location and course list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SemesterInfo {
    pub resources_path: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// Read-only navigation table injected at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationMap {
    entries: Vec<NavEntry>,
    semesters: HashMap<u32, SemesterInfo>,
}

impl NavigationMap {
    /// Build a map from explicit parts.
    pub fn new(entries: Vec<NavEntry>, semesters: HashMap<u32, SemesterInfo>) -> Self {
        Self { entries, semesters }
    }

    /// Load a map from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let contents = fs::read_to_string(path)?;
        let map: NavigationMap = serde_json::from_str(&contents)?;
        Ok(map)
    }

    /// Entries whose keywords appear in the query, in table order.
    pub fn matching_entries(&self, query: &str) -> Vec<&NavEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.keywords.iter().any(|keyword| query.contains(keyword)))
            .collect()
    }

    /// Resource info for a semester number, when known.
    pub fn semester(&self, number: u32) -> Option<&SemesterInfo> {
        self.semesters.get(&number)
    }

    /// Built-in table used when no navigation file is configured.
    pub fn default_map() -> Self {
        let entries = vec![
            NavEntry {
                keywords: vec!["assignment".to_string()],
                title: "Assignments".to_string(),
                path: "/resources/assignments".to_string(),
                description: "Submitted and published assignments by course".to_string(),
            },
            NavEntry {
                keywords: vec!["notes".to_string(), "lecture".to_string()],
                title: "Lecture Notes".to_string(),
                path: "/resources/notes".to_string(),
                description: "Unit-wise lecture notes".to_string(),
            },
            NavEntry {
                keywords: vec!["lab".to_string(), "manual".to_string()],
                title: "Lab Manuals".to_string(),
                path: "/resources/lab-manuals".to_string(),
                description: "Practical manuals and record templates".to_string(),
            },
            NavEntry {
                keywords: vec!["download".to_string()],
                title: "Downloads".to_string(),
                path: "/downloads".to_string(),
                description: "Curated software and reference downloads".to_string(),
            },
            NavEntry {
                keywords: vec!["syllabus".to_string()],
                title: "Syllabus".to_string(),
                path: "/academics/syllabus".to_string(),
                description: "Current syllabus for every programme".to_string(),
            },
            NavEntry {
                keywords: vec!["timetable".to_string(), "schedule".to_string()],
                title: "Timetable".to_string(),
                path: "/academics/timetable".to_string(),
                description: "Class and exam schedules".to_string(),
            },
            NavEntry {
                keywords: vec!["chemistry".to_string()],
                title: "Chemistry Department".to_string(),
                path: "/departments/chemistry".to_string(),
                description: String::new(),
            },
            NavEntry {
                keywords: vec!["computer".to_string(), "cs".to_string()],
                title: "Computer Science Department".to_string(),
                path: "/departments/computer-science".to_string(),
                description: String::new(),
            },
        ];

        let mut semesters = HashMap::new();
        semesters.insert(
            1,
            SemesterInfo {
                resources_path: "/semesters/1/resources".to_string(),
                courses: vec![
                    "CHB101".to_string(),
                    "MAB101".to_string(),
                    "PHB101".to_string(),
                    "HUB101".to_string(),
                ],
            },
        );
        semesters.insert(
            2,
            SemesterInfo {
                resources_path: "/semesters/2/resources".to_string(),
                courses: vec!["ESB101".to_string(), "MAB101".to_string()],
            },
        );
        semesters.insert(
            3,
            SemesterInfo {
                resources_path: "/semesters/3/resources".to_string(),
                courses: vec!["CSB201".to_string()],
            },
        );

        Self { entries, semesters }
    }
}
