//! Git state of the project around a venv

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Directory holding `.git`: the venv itself or its parent project
pub fn find_repo(venv: &Path) -> Option<PathBuf> {
    std::iter::once(venv)
        .chain(venv.parent())
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Whether the work tree has uncommitted changes.
///
/// Uses `--no-optional-locks` so the index lock is never taken. Returns
/// `None` when git is missing or the command fails.
pub fn has_uncommitted_changes(repo: &Path) -> Option<bool> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["--no-optional-locks", "status", "--porcelain"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(result) if result.status.success() => Some(!result.stdout.is_empty()),
        Ok(result) => {
            tracing::debug!(
                repo = %repo.display(),
                status = ?result.status.code(),
                "git status failed"
            );
            None
        }
        Err(err) => {
            tracing::debug!(repo = %repo.display(), error = %err, "git unavailable");
            None
        }
    }
}
