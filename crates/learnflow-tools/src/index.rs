//! In-memory snapshot of locally discoverable resources.
//!
//! Built once at process start and read-only afterwards; the snapshot may go
//! stale until restart, which is an accepted window.

use chrono::{DateTime, Utc};
use learnflow_protocol::{DownloadEntry, ResourceEntry, SearchResults};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Extensions the index picks up during the startup scan.
const INDEXABLE_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "ppt", "pptx", "txt", "md", "zip"];
/// Curated downloads file under the resource root.
const DOWNLOADS_FILE: &str = "downloads.json";

/// Category subdirectories expected under the resource root.
const CATEGORY_DIRS: [&str; 3] = ["assignments", "notes", "lab-manuals"];

/// Best-effort snapshot of local resource files plus the curated downloads
/// list. Any filesystem error degrades a category to an empty list; building
/// the index never fails.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    assignments: Vec<ResourceEntry>,
    notes: Vec<ResourceEntry>,
    lab_manuals: Vec<ResourceEntry>,
    downloads: Vec<DownloadEntry>,
}

impl ResourceIndex {
    /// Scan the resource tree and load the curated downloads list.
    ///
    /// Expected subdirectories are created when missing; creation failure is
    /// tolerated and only logged so startup never aborts.
    pub fn build(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        for dir in CATEGORY_DIRS {
            let path = root.join(dir);
            if let Err(err) = fs::create_dir_all(&path) {
                warn!(
                    "failed to create resource directory (path={}, error={})",
                    path.display(),
                    err
                );
            }
        }

        let assignments = scan_category(root, "assignments");
        let notes = scan_category(root, "notes");
        let lab_manuals = scan_category(root, "lab-manuals");
        let downloads = load_downloads(&root.join(DOWNLOADS_FILE));

        info!(
            "resource index built (assignments={}, notes={}, lab_manuals={}, downloads={})",
            assignments.len(),
            notes.len(),
            lab_manuals.len(),
            downloads.len()
        );

        Self {
            assignments,
            notes,
            lab_manuals,
            downloads,
        }
    }

    /// Case-insensitive substring search across every category.
    ///
    /// Files match on name or path; downloads match on title, description,
    /// or tags. No ranking beyond category grouping and no pagination; the
    /// composer truncates per category when it builds prompt text.
    pub fn search(&self, query: &str) -> SearchResults {
        let needle = query.trim().to_lowercase();

        let assignments = matching_files(&self.assignments, &needle);
        let notes = matching_files(&self.notes, &needle);
        let lab_manuals = matching_files(&self.lab_manuals, &needle);
        let downloads: Vec<DownloadEntry> = self
            .downloads
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry.description.to_lowercase().contains(&needle)
                    || entry
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        let total_results =
            assignments.len() + notes.len() + lab_manuals.len() + downloads.len();
        SearchResults {
            assignments,
            notes,
            lab_manuals,
            downloads,
            total_results,
        }
    }

    /// Number of files and downloads in the snapshot.
    pub fn total_indexed(&self) -> usize {
        self.assignments.len() + self.notes.len() + self.lab_manuals.len() + self.downloads.len()
    }
}

fn matching_files(entries: &[ResourceEntry], needle: &str) -> Vec<ResourceEntry> {
    entries
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(needle)
                || entry.path.to_lowercase().contains(needle)
        })
        .cloned()
        .collect()
}

fn scan_category(root: &Path, category: &str) -> Vec<ResourceEntry> {
    let dir = root.join(category);
    let mut entries = Vec::new();

    for result in WalkDir::new(&dir) {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    "resource scan error (category={}, error={})",
                    category, err
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();
        if !INDEXABLE_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("resource metadata error (path={}, error={})", path.display(), err);
                continue;
            }
        };
        let modified_at: Option<DateTime<Utc>> =
            metadata.modified().ok().map(DateTime::<Utc>::from);
        let relative = path.strip_prefix(root).unwrap_or(path);
        entries.push(ResourceEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path: relative.display().to_string(),
            extension,
            size_bytes: metadata.len(),
            modified_at,
        });
    }

    debug!("scanned category (category={}, files={})", category, entries.len());
    entries
}

fn load_downloads(path: &Path) -> Vec<DownloadEntry> {
    if !path.exists() {
        // Seed an empty list so operators have a file to edit.
        if let Err(err) = fs::write(path, "[]") {
            warn!(
                "failed to seed downloads file (path={}, error={})",
                path.display(),
                err
            );
        }
        return Vec::new();
    }
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(downloads) => downloads,
            Err(err) => {
                warn!(
                    "failed to decode downloads file (path={}, error={})",
                    path.display(),
                    err
                );
                Vec::new()
            }
        },
        Err(err) => {
            warn!(
                "failed to read downloads file (path={}, error={})",
                path.display(),
                err
            );
            Vec::new()
        }
    }
}
