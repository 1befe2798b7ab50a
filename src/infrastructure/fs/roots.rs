//! Default scan roots
//!
//! Standard uv venv locations first, then common project directories.
//! Only directories that exist are returned.

use std::path::{Path, PathBuf};

use super::home::uv_tidy_home_dir;

/// Project directories scanned when no root is given
const PROJECT_DIRS: &[&str] = &["projects", "dev", "code", "workspace"];

/// Candidate roots below `home`, in scan order
pub fn candidate_roots(home: &Path, local_app_data: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = vec![
        home.join(".uv/venvs"),
        home.join(".local/share/uv/venvs"),
        home.join(".cache/uv/venvs"),
    ];

    if cfg!(target_os = "macos") {
        roots.push(home.join("Library/Caches/uv/venvs"));
    }
    if let Some(local) = local_app_data {
        roots.push(local.join("uv").join("venvs"));
    }

    roots.extend(PROJECT_DIRS.iter().map(|d| home.join(d)));
    roots
}

/// Existing default roots for the current user.
pub fn default_roots() -> Vec<PathBuf> {
    let Some(home) = uv_tidy_home_dir() else {
        return Vec::new();
    };
    let local_app_data = if cfg!(windows) {
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    } else {
        None
    };

    let mut seen = Vec::new();
    for root in candidate_roots(&home, local_app_data.as_deref()) {
        if root.is_dir() && !seen.contains(&root) {
            seen.push(root);
        }
    }
    seen
}
