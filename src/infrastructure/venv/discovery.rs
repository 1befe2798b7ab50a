//! Venv discovery
//!
//! Walks a root with `walkdir`, skipping noise directories and never
//! descending into a venv once found.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::layout::{self, Layout};
use crate::domain::ports::VenvLocator;
use crate::error::TidyError;

/// Default recursion limit below each root
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Directory names never descended into
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    ".vscode",
    ".idea",
];

#[derive(Debug, Clone)]
pub struct WalkdirLocator {
    max_depth: usize,
    exclude_dirs: Vec<String>,
    layout: Layout,
}

impl Default for WalkdirLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl WalkdirLocator {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            layout: Layout::native(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_exclude_dirs(mut self, exclude_dirs: Vec<String>) -> Self {
        self.exclude_dirs = exclude_dirs;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    fn is_venv(&self, path: &Path) -> bool {
        layout::detect(path, self.layout).is_venv()
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    /// Children of `<dir>/.uv/venvs`, checked even past the depth limit
    fn uv_venvs_in(&self, dir: &Path, found: &mut BTreeSet<PathBuf>) {
        let uv_venvs = dir.join(".uv").join("venvs");
        let Ok(entries) = std::fs::read_dir(&uv_venvs) else {
            return;
        };
        tracing::debug!(path = %uv_venvs.display(), "checking uv venvs directory");
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) && self.is_venv(&path) {
                found.insert(path);
            }
        }
    }
}

impl VenvLocator for WalkdirLocator {
    fn locate(&self, root: &Path) -> Result<Vec<PathBuf>, TidyError> {
        let meta = std::fs::metadata(root).map_err(|e| TidyError::RootUnavailable {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(TidyError::RootUnavailable {
                path: root.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut found = BTreeSet::new();
        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(TidyError::RootUnavailable {
                        path: root.to_path_buf(),
                        message: err.to_string(),
                    });
                }
                Err(err) => {
                    let path = err.path().map(PathBuf::from).unwrap_or_else(|| root.to_path_buf());
                    tracing::warn!(path = %path.display(), error = %err, "skipping directory");
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.depth() > 0 && self.is_excluded(&entry.file_name().to_string_lossy()) {
                walker.skip_current_dir();
                continue;
            }
            if self.is_venv(entry.path()) {
                found.insert(entry.into_path());
                walker.skip_current_dir();
                continue;
            }
            self.uv_venvs_in(entry.path(), &mut found);
        }

        tracing::info!(root = %root.display(), count = found.len(), "discovery finished");
        Ok(found.into_iter().collect())
    }
}
