//! Descriptor builder
//!
//! Reads one directory and produces a [`VenvDescriptor`]. Strictly read-only:
//! activity markers are only `stat`-ed, and the only file opened is
//! `pyvenv.cfg`, after its timestamps have been taken.

use std::collections::BTreeSet;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use super::git;
use super::layout::{self, Layout};
use crate::domain::entities::{AgeSource, VenvDescriptor};
use crate::domain::ports::VenvInspector;
use crate::error::ScanError;

/// Entries walked between two deadline checks
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// [`VenvInspector`] backed by the local filesystem
#[derive(Debug, Clone)]
pub struct FsVenvInspector {
    layout: Layout,
    now: DateTime<Utc>,
    check_git: bool,
}

impl Default for FsVenvInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FsVenvInspector {
    /// Native layout, reference time taken now, git probing on
    pub fn new() -> Self {
        Self {
            layout: Layout::native(),
            now: Utc::now(),
            check_git: true,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Reference time that ages are measured against
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_git(mut self, check_git: bool) -> Self {
        self.check_git = check_git;
        self
    }
}

impl VenvInspector for FsVenvInspector {
    fn inspect(&self, path: &Path, deadline: Instant) -> Result<Option<VenvDescriptor>, ScanError> {
        let meta = fs::symlink_metadata(path).map_err(|e| ScanError::from_io(path, &e))?;
        if !meta.is_dir() {
            return Ok(None);
        }

        let detection = layout::detect(path, self.layout);
        if !detection.is_venv() {
            return Ok(None);
        }
        check_deadline(path, deadline)?;

        // Timestamps first: reading pyvenv.cfg below may bump its atime
        let activity = collect_activity(&self.layout.activity_markers(path), &meta);
        let cfg = read_cfg(path);
        let corruption = layout::corruption(path, &detection, cfg.readable);

        let size_kb = dir_size_kb(path, deadline)?;

        let mut descriptor = VenvDescriptor::new(path);
        descriptor.age_source = activity.source;
        descriptor.last_modified = activity.modified.map(DateTime::<Utc>::from);
        descriptor.last_accessed = activity.accessed.map(DateTime::<Utc>::from);
        descriptor.age_days = descriptor.last_modified.map(|t| days_between(t, self.now));
        descriptor.last_access_days = descriptor.last_accessed.map(|t| days_between(t, self.now));
        descriptor.size_kb = Some(size_kb);
        descriptor.python_version = cfg.python_version;
        descriptor.managed_by_uv = cfg.mentions_uv || path.join(".uv-proj").exists();

        if let Some(kind) = corruption {
            tracing::debug!(path = %path.display(), corruption = %kind, "corrupted venv");
            descriptor = descriptor.with_corruption(kind);
        } else {
            descriptor.packages = packages(&self.layout.site_packages(path));
        }

        if self.check_git {
            if let Some(repo) = git::find_repo(path) {
                descriptor.has_git = true;
                if Instant::now() < deadline {
                    descriptor.has_uncommitted_changes = git::has_uncommitted_changes(&repo);
                }
            }
        }

        Ok(Some(descriptor))
    }
}

fn check_deadline(path: &Path, deadline: Instant) -> Result<(), ScanError> {
    let now = Instant::now();
    if now >= deadline {
        return Err(ScanError::TimedOut {
            path: path.to_path_buf(),
            after: now.saturating_duration_since(deadline),
        });
    }
    Ok(())
}

fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - then).num_days().max(0) as u64
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Activity {
    modified: Option<SystemTime>,
    accessed: Option<SystemTime>,
    source: AgeSource,
}

/// Latest timestamps over the markers, or the directory's own mtime.
///
/// `pyvenv.cfg` is left out of the access signal since this tool reads it.
fn collect_activity(markers: &[PathBuf], dir: &Metadata) -> Activity {
    let mut modified: Option<SystemTime> = None;
    let mut accessed: Option<SystemTime> = None;

    for marker in markers {
        let Ok(meta) = fs::symlink_metadata(marker) else {
            continue;
        };
        if let Ok(t) = meta.modified() {
            modified = modified.max(Some(t));
        }
        if marker.file_name().is_some_and(|n| n == "pyvenv.cfg") {
            continue;
        }
        if let Ok(t) = meta.accessed() {
            accessed = accessed.max(Some(t));
        }
    }

    if modified.is_some() {
        return Activity {
            modified,
            accessed,
            source: AgeSource::Markers,
        };
    }

    Activity {
        modified: dir.modified().ok(),
        accessed: None,
        source: AgeSource::Directory,
    }
}

#[derive(Debug, Default)]
struct CfgInfo {
    readable: bool,
    python_version: Option<String>,
    mentions_uv: bool,
}

fn read_cfg(venv: &Path) -> CfgInfo {
    let cfg = venv.join("pyvenv.cfg");
    if !cfg.exists() {
        return CfgInfo {
            readable: true,
            ..Default::default()
        };
    }

    match fs::read_to_string(&cfg) {
        Ok(content) => parse_cfg(&content),
        Err(err) => {
            tracing::debug!(path = %cfg.display(), error = %err, "pyvenv.cfg unreadable");
            CfgInfo::default()
        }
    }
}

fn parse_cfg(content: &str) -> CfgInfo {
    let mut info = CfgInfo {
        readable: true,
        ..Default::default()
    };

    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "version" | "version_info" if info.python_version.is_none() => {
                info.python_version = Some(value.to_string());
            }
            "uv" => info.mentions_uv = true,
            _ => {}
        }
    }
    info
}

/// Recursive size in KiB, rounded up. Links are not followed; unreadable
/// entries are skipped.
fn dir_size_kb(path: &Path, deadline: Instant) -> Result<u64, ScanError> {
    let mut bytes = 0u64;

    for (index, entry) in WalkDir::new(path).follow_links(false).into_iter().enumerate() {
        if index % DEADLINE_CHECK_INTERVAL == 0 {
            check_deadline(path, deadline)?;
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "size walk skipped entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            bytes += meta.len();
        }
    }

    Ok(bytes.div_ceil(1024))
}

/// Normalized distribution names from `*.dist-info` / `*.egg-info` entries
fn packages(site_packages: &[PathBuf]) -> BTreeSet<String> {
    site_packages
        .iter()
        .filter_map(|dir| fs::read_dir(dir).ok())
        .flatten()
        .filter_map(Result::ok)
        .filter_map(|entry| normalize_package(&entry.file_name().to_string_lossy()))
        .collect()
}

fn normalize_package(entry: &str) -> Option<String> {
    let stem = entry
        .strip_suffix(".dist-info")
        .or_else(|| entry.strip_suffix(".egg-info"))?;
    let name = stem.split('-').next().unwrap_or(stem);
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase().replace('_', "-"))
}
