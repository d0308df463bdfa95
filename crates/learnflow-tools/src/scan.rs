//! Bounded recursive file scan backing the `/scan` and `/debug` commands.

use learnflow_protocol::{AdapterError, ScanReport, ScannedFile};
use log::{info, warn};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Hard cap on files returned by one scan.
pub const MAX_SCAN_FILES: usize = 20;

/// Directories never descended into.
const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "dist",
    "build",
    "__pycache__",
];

/// Recursive file lister with exclusion rules and a result cap.
#[derive(Debug, Clone)]
pub struct FileScanner {
    max_files: usize,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self {
            max_files: MAX_SCAN_FILES,
        }
    }
}

impl FileScanner {
    /// Create a scanner with a custom file cap.
    pub fn new(max_files: usize) -> Self {
        Self { max_files }
    }

    /// List files under `root`, skipping excluded and hidden directories.
    ///
    /// `extension_filter` restricts results to the given lowercase
    /// extensions when present. The report is capped at the configured file
    /// count and flags truncation.
    pub fn scan(
        &self,
        root: impl AsRef<Path>,
        extension_filter: Option<&[String]>,
    ) -> Result<ScanReport, AdapterError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AdapterError::InvalidPath(root.display().to_string()));
        }

        let mut files = Vec::new();
        let mut truncated = false;

        for result in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry))
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("scan walk error (error={})", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if files.len() >= self.max_files {
                truncated = true;
                break;
            }
            let path = entry.path();
            if let Some(filter) = extension_filter {
                let extension = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.to_lowercase())
                    .unwrap_or_default();
                if !filter.iter().any(|wanted| wanted == &extension) {
                    continue;
                }
            }
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!("scan read error (path={}, error={})", path.display(), err);
                    continue;
                }
            };
            let content = String::from_utf8_lossy(&bytes).to_string();
            let line_count = content.lines().count();
            let relative = path.strip_prefix(root).unwrap_or(path);
            files.push(ScannedFile {
                path: relative.display().to_string(),
                content,
                line_count,
                size_bytes: bytes.len() as u64,
            });
        }

        info!(
            "scan completed (root={}, files={}, truncated={})",
            root.display(),
            files.len(),
            truncated
        );
        Ok(ScanReport { files, truncated })
    }
}

fn is_excluded(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    EXCLUDED_DIRS.contains(&name.as_ref()) || name.starts_with('.')
}
