//! FileSystem port - abstraction over the mutating side of the tool
//!
//! Only the execution gate writes to disk, and it does so through this
//! trait so that tests can prove a dry run never reaches it.

use std::path::{Path, PathBuf};

use crate::error::DeletionError;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
}

impl FsError {
    /// Attach `path` to an I/O error.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "Not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for FsError {}

impl From<FsError> for DeletionError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(_) => DeletionError::Missing,
            FsError::PermissionDenied(_) => DeletionError::PermissionDenied,
            FsError::Io(err) => DeletionError::Io(err.to_string()),
        }
    }
}

/// What a path points at, without following links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Symlink,
    File,
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - test doubles recording every call
pub trait FileSystem: Send + Sync {
    /// Kind of entry at `path`, from `symlink_metadata`
    fn entry_kind(&self, path: &Path) -> FsResult<EntryKind>;

    /// Remove a directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;
}
