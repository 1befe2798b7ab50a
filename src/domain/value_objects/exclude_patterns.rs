//! Exclude patterns value object
//!
//! Shell-style globs matched against the full venv path and against its
//! directory name. `*` also matches `/`, so `*test*` matches any path that
//! contains `test`.

use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::ConfigError;

/// Maximum number of patterns accepted
const MAX_PATTERNS: usize = 1000;

/// Compiled set of exclude globs
#[derive(Clone)]
pub struct ExcludePatterns {
    set: GlobSet,
    patterns: Vec<String>,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ExcludePatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludePatterns")
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl ExcludePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Compile patterns. Blank entries are ignored.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            if kept.len() >= MAX_PATTERNS {
                return Err(ConfigError::InvalidValue {
                    key: "exclude",
                    message: format!("at most {} patterns are allowed", MAX_PATTERNS),
                });
            }

            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .build()
                .map_err(|e| ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.kind().to_string(),
                })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }

        let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: kept.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            set,
            patterns: kept,
        })
    }

    /// Return the first pattern matching `path`, if any.
    pub fn matching(&self, path: &Path) -> Option<&str> {
        if self.patterns.is_empty() {
            return None;
        }

        let mut hits = self.set.matches(path);
        if hits.is_empty() {
            if let Some(name) = path.file_name() {
                hits = self.set.matches(Path::new(name));
            }
        }

        hits.into_iter()
            .min()
            .map(|index| self.patterns[index].as_str())
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.matching(path).is_some()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
