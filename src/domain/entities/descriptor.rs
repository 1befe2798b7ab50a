//! Venv descriptor entity
//!
//! A read-only snapshot of one venv directory taken by the descriptor
//! builder. The rule engine only ever sees this snapshot, never the
//! filesystem.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a venv is considered broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionType {
    /// Interpreter entry absent or a dangling link
    MissingPython,
    /// No activation script
    MissingActivate,
    /// Metadata or layout cannot be read
    Unreadable,
    /// One of the layout directories is gone
    IncompleteLayout,
}

impl CorruptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorruptionType::MissingPython => "missing_python",
            CorruptionType::MissingActivate => "missing_activate",
            CorruptionType::Unreadable => "unreadable",
            CorruptionType::IncompleteLayout => "incomplete_layout",
        }
    }
}

impl fmt::Display for CorruptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where `age_days` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgeSource {
    /// Most recent mtime among activity markers
    #[default]
    Markers,
    /// No marker readable; directory timestamp used instead
    Directory,
}

/// Coarse activity label, for reports only.
///
/// The rule engine never reads this; it works from the numeric signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPattern {
    Recent,
    Regular,
    Stale,
    Abandoned,
    Unknown,
}

impl AccessPattern {
    pub fn from_days(days: Option<u64>) -> Self {
        match days {
            None => AccessPattern::Unknown,
            Some(d) if d < 7 => AccessPattern::Recent,
            Some(d) if d < 30 => AccessPattern::Regular,
            Some(d) if d < 180 => AccessPattern::Stale,
            Some(_) => AccessPattern::Abandoned,
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessPattern::Recent => "recent",
            AccessPattern::Regular => "regular",
            AccessPattern::Stale => "stale",
            AccessPattern::Abandoned => "abandoned",
            AccessPattern::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Snapshot of a single venv directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenvDescriptor {
    /// Absolute path of the venv
    pub path: PathBuf,
    /// Days since the most recent activity-marker modification
    pub age_days: Option<u64>,
    pub age_source: AgeSource,
    /// Days since the most recent activity-marker access
    pub last_access_days: Option<u64>,
    /// Recursive size in KiB, symlinks not followed
    pub size_kb: Option<u64>,
    /// Installed distributions (normalized names)
    pub packages: BTreeSet<String>,
    pub has_git: bool,
    /// `None` when git is unavailable or the status query failed
    pub has_uncommitted_changes: Option<bool>,
    pub corruption: Option<CorruptionType>,
    pub python_version: Option<String>,
    /// `pyvenv.cfg` mentions uv or a `.uv-proj` marker exists
    pub managed_by_uv: bool,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl VenvDescriptor {
    /// A healthy, empty descriptor for `path`.
    ///
    /// Metrics start unset; the builder (or a test) fills them in.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            age_days: None,
            age_source: AgeSource::Markers,
            last_access_days: None,
            size_kb: None,
            packages: BTreeSet::new(),
            has_git: false,
            has_uncommitted_changes: None,
            corruption: None,
            python_version: None,
            managed_by_uv: false,
            last_modified: None,
            last_accessed: None,
        }
    }

    pub fn with_age_days(mut self, days: u64) -> Self {
        self.age_days = Some(days);
        self
    }

    pub fn with_age_source(mut self, source: AgeSource) -> Self {
        self.age_source = source;
        self
    }

    pub fn with_last_access_days(mut self, days: u64) -> Self {
        self.last_access_days = Some(days);
        self
    }

    pub fn with_size_kb(mut self, size_kb: u64) -> Self {
        self.size_kb = Some(size_kb);
        self
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_git(mut self, has_git: bool, uncommitted: Option<bool>) -> Self {
        self.has_git = has_git;
        self.has_uncommitted_changes = uncommitted;
        self
    }

    /// Mark as corrupted. Packages are dropped: they are not reliable.
    pub fn with_corruption(mut self, corruption: CorruptionType) -> Self {
        self.corruption = Some(corruption);
        self.packages.clear();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_corrupted(&self) -> bool {
        self.corruption.is_some()
    }

    /// Days since the most recent observable activity (modification or access).
    pub fn days_since_activity(&self) -> Option<u64> {
        match (self.age_days, self.last_access_days) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn access_pattern(&self) -> AccessPattern {
        AccessPattern::from_days(self.days_since_activity())
    }

    /// Directory name, used for display and name ordering
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_since_activity_prefers_most_recent_signal() {
        let d = VenvDescriptor::new("/v")
            .with_age_days(300)
            .with_last_access_days(2);
        assert_eq!(d.days_since_activity(), Some(2));
        assert_eq!(d.access_pattern(), AccessPattern::Recent);
    }

    #[test]
    fn days_since_activity_uses_whichever_is_known() {
        let d = VenvDescriptor::new("/v").with_age_days(200);
        assert_eq!(d.days_since_activity(), Some(200));
        assert_eq!(d.access_pattern(), AccessPattern::Abandoned);
        assert_eq!(
            VenvDescriptor::new("/v").access_pattern(),
            AccessPattern::Unknown
        );
    }

    #[test]
    fn corruption_clears_packages() {
        let d = VenvDescriptor::new("/v")
            .with_packages(["numpy"])
            .with_corruption(CorruptionType::MissingPython);
        assert!(d.is_corrupted());
        assert!(d.packages.is_empty());
    }

    #[test]
    fn name_is_last_component() {
        assert_eq!(VenvDescriptor::new("/srv/venvs/api").name(), "api");
    }
}
