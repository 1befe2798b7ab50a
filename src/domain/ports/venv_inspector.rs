//! Ports for finding and inspecting venvs

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::domain::entities::VenvDescriptor;
use crate::error::{ScanError, TidyError};

/// Builds a descriptor for one directory.
///
/// Returns `Ok(None)` when the directory is not a venv. Must not modify the
/// directory, and should give up with [`ScanError::TimedOut`] once
/// `deadline` has passed.
pub trait VenvInspector: Send + Sync {
    fn inspect(&self, path: &Path, deadline: Instant) -> Result<Option<VenvDescriptor>, ScanError>;
}

/// Finds candidate venv directories under a root
pub trait VenvLocator {
    /// Fails only when the root itself cannot be read.
    fn locate(&self, root: &Path) -> Result<Vec<PathBuf>, TidyError>;
}
