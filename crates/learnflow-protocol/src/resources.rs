//! Data model for locally discoverable resources and adapter results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Indexed file discovered by the resource scan at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceEntry {
    /// File name without directories.
    pub name: String,
    /// Path relative to the resource root.
    pub path: String,
    /// Lowercased extension without the dot.
    pub extension: String,
    /// Size on disk in bytes.
    pub size_bytes: u64,
    /// Last modification time, when the filesystem reports one.
    pub modified_at: Option<DateTime<Utc>>,
}

/// Curated download entry loaded from `downloads.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub url: String,
}

/// Category-grouped result of a resource index search. Transient, computed
/// per query; the composer truncates each category independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub assignments: Vec<ResourceEntry>,
    pub notes: Vec<ResourceEntry>,
    pub lab_manuals: Vec<ResourceEntry>,
    pub downloads: Vec<DownloadEntry>,
    pub total_results: usize,
}

impl SearchResults {
    /// True when no category matched.
    pub fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}

/// Ranked snippet returned by a web search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Result snippet.
    pub snippet: String,
}

/// File captured by the scan adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Path relative to the scan root.
    pub path: String,
    /// Full text content (lossy UTF-8).
    pub content: String,
    /// Number of lines in the content.
    pub line_count: usize,
    /// Size on disk in bytes.
    pub size_bytes: u64,
}

/// Scan adapter result with a truncation flag for the file cap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub files: Vec<ScannedFile>,
    pub truncated: bool,
}
