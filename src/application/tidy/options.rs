//! Tidy options

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, DEFAULT_TIMEOUT_SECS};
use crate::domain::policies::{RuleConfig, DEFAULT_MIN_AGE_DAYS, DEFAULT_RECENCY_DAYS};
use crate::domain::services::SelectionFilters;
use crate::domain::value_objects::{ExcludePatterns, SortKey};
use crate::error::ConfigError;
use crate::infrastructure::venv::{DEFAULT_EXCLUDE_DIRS, DEFAULT_MAX_DEPTH};

/// Options for a tidy run
#[derive(Debug, Clone)]
pub struct TidyOptions {
    /// Roots to scan; must not be empty
    pub roots: Vec<PathBuf>,
    pub rules: RuleConfig,
    pub filters: SelectionFilters,
    pub sort: SortKey,
    /// `None` or `Some(0)` means unbounded
    pub limit: Option<usize>,
    /// Scan and deletion workers
    pub jobs: usize,
    /// Per-path scan timeout
    pub timeout: Duration,
    pub max_depth: usize,
    pub exclude_dirs: Vec<String>,
}

impl Default for TidyOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            rules: RuleConfig::default(),
            filters: SelectionFilters::default(),
            sort: SortKey::default(),
            limit: None,
            jobs: 1,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TidyOptions {
    /// Create new tidy options
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a layered config into options.
    ///
    /// Thresholds the user set explicitly drive the rules and are also
    /// applied as selection filters; unset ones fall back to rule defaults.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let exclude = ExcludePatterns::new(&config.selection.exclude)?;
        let min_size_kb = config.rules.min_size_mb.map(|mb| mb * 1024);

        let rules = RuleConfig {
            min_age_days: config.rules.min_age_days.unwrap_or(DEFAULT_MIN_AGE_DAYS),
            min_size_kb,
            recency_days: config.rules.recency_days.unwrap_or(DEFAULT_RECENCY_DAYS),
            exclude: exclude.clone(),
        };
        let filters = SelectionFilters {
            min_age_days: config.rules.min_age_days,
            min_size_kb,
            exclude,
        };

        Ok(Self {
            roots: Vec::new(),
            rules,
            filters,
            sort: config.selection.sort_by,
            limit: config.selection.limit,
            jobs: config.scan.effective_jobs(),
            timeout: Duration::from_secs(config.scan.timeout_secs),
            max_depth: config.scan.max_depth,
            exclude_dirs: config.scan.exclude_dirs.clone(),
        })
    }

    /// Set roots
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = roots;
        self
    }

    /// Set rule configuration
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_filters(mut self, filters: SelectionFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
