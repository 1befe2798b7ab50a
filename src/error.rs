//! Error types for uv-tidy
//!
//! Per-path failures (`ScanError`, `EvaluationError`, `DeletionError`) are
//! recorded and the batch continues. `ConfigError` and `TidyError` abort a run
//! before any filesystem side effect.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for uv-tidy operations
pub type TidyResult<T> = Result<T, TidyError>;

/// Errors that stop a whole run
#[derive(Error, Debug)]
pub enum TidyError {
    /// Invalid configuration (thresholds, patterns, config file)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A scan root is missing or cannot be listed
    #[error("cannot scan {path}: {message}")]
    RootUnavailable { path: PathBuf, message: String },

    /// No root was given and none of the standard locations exist
    #[error("no venv directories found to scan; pass --venv-dir")]
    NoRoots,
}

/// Invalid configuration; always fatal
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Exclude glob failed to compile
    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Numeric setting out of range
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    /// Unknown sort key
    #[error("unknown sort key '{0}' (expected age, size or name)")]
    UnknownSortKey(String),

    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Failure to inspect a single path; the path is skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Path vanished between discovery and inspection
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Path cannot be read at all
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Inspection overran its per-path deadline
    #[error("timed out after {}s: {path}", .after.as_secs())]
    TimedOut { path: PathBuf, after: Duration },

    /// Run was cancelled before the path was inspected
    #[error("cancelled before scan: {0}")]
    Cancelled(PathBuf),

    /// Any other I/O failure
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl ScanError {
    /// Map an I/O error on `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => ScanError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path),
            _ => ScanError::Io {
                path,
                message: err.to_string(),
            },
        }
    }

    /// Path the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::NotFound(p) | ScanError::PermissionDenied(p) | ScanError::Cancelled(p) => p,
            ScanError::TimedOut { path, .. } | ScanError::Io { path, .. } => path,
        }
    }
}

/// A descriptor that the rule engine cannot judge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// Healthy descriptor without a required metric
    #[error("descriptor for {path} is missing {field}")]
    MissingField { path: PathBuf, field: &'static str },
}

impl EvaluationError {
    /// Path of the descriptor that could not be judged
    pub fn path(&self) -> &std::path::Path {
        match self {
            EvaluationError::MissingField { path, .. } => path,
        }
    }
}

/// Per-item deletion failure; recorded in the execution report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeletionError {
    /// Target was already gone
    #[error("already removed")]
    Missing,

    /// Target is no longer a plain directory (symlink or file)
    #[error("not a directory (refusing to follow links)")]
    NotADirectory,

    /// Permission denied while removing
    #[error("permission denied")]
    PermissionDenied,

    /// Any other I/O failure
    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for DeletionError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DeletionError::Missing,
            std::io::ErrorKind::PermissionDenied => DeletionError::PermissionDenied,
            _ => DeletionError::Io(err.to_string()),
        }
    }
}
