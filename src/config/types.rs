//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SortKey;
use crate::error::ConfigError;
use crate::infrastructure::venv::{DEFAULT_EXCLUDE_DIRS, DEFAULT_MAX_DEPTH};

use super::loader::{self, ConfigWarning};

/// Default per-path scan timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound for the default worker count
pub const MAX_DEFAULT_JOBS: usize = 8;

/// Rule thresholds.
///
/// Unset values fall back to the rule defaults; values the user did set are
/// also re-applied as selection filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(default)]
    pub min_age_days: Option<u64>,

    #[serde(default)]
    pub min_size_mb: Option<u64>,

    #[serde(default)]
    pub recency_days: Option<u64>,
}

/// Selection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionConfig {
    #[serde(default)]
    pub sort_by: SortKey,

    /// 0 or absent means unbounded
    #[serde(default)]
    pub limit: Option<usize>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Discovery and scan pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Defaults to available parallelism, capped
    #[serde(default)]
    pub jobs: Option<usize>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            exclude_dirs: default_exclude_dirs(),
            jobs: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScanConfig {
    /// Configured worker count, or available parallelism capped at 8
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(MAX_DEFAULT_JOBS)
        })
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Explicit file, else the user config file, else defaults; then env.
    pub fn load_layered(
        explicit: Option<&Path>,
    ) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_layered(explicit)
    }

    /// Reject values no run can work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_depth",
                message: "must be at least 1".to_string(),
            });
        }
        if self.scan.jobs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "jobs",
                message: "must be at least 1".to_string(),
            });
        }
        if self.scan.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(mb) = self.rules.min_size_mb {
            if mb.checked_mul(1024).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: "min_size_mb",
                    message: format!("{} is too large", mb),
                });
            }
        }
        Ok(())
    }
}
