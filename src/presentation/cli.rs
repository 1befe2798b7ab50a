//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - There is a single command; every flag overrides the layered config
//! - Deletion needs `--yes`, or `--interactive` and a confirmed prompt

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ColorMode, Config};
use crate::domain::value_objects::SortKey;

/// uv-tidy - find and remove unused uv virtual environments
#[derive(Parser, Debug, Default)]
#[command(name = "uv-tidy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Without --yes nothing is deleted; the run only reports.")]
pub struct Cli {
    /// Directory to scan (repeatable; default: standard uv locations)
    #[arg(long = "venv-dir", value_name = "DIR")]
    pub venv_dirs: Vec<PathBuf>,

    /// Glob of venv paths to always keep (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Directory name never descended into (repeatable, adds to defaults)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Maximum recursion depth below each root
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Only look at direct children of each root
    #[arg(long, conflicts_with = "max_depth")]
    pub no_recursive: bool,

    /// Minimum age in days before a venv may be removed
    #[arg(long, value_name = "N")]
    pub min_age_days: Option<u64>,

    /// Minimum size in MB before a venv may be removed
    #[arg(long, value_name = "N")]
    pub min_size_mb: Option<u64>,

    /// Venvs used within this many days are always kept
    #[arg(long, value_name = "N")]
    pub recency_days: Option<u64>,

    /// Order of removal candidates
    #[arg(long, value_enum)]
    pub sort_by: Option<SortKey>,

    /// Remove at most N venvs (0 = no limit)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Number of scan workers
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-venv scan timeout in seconds
    #[arg(long, value_name = "N")]
    pub timeout_secs: Option<u64>,

    /// Config file (default: ~/.config/uv-tidy/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delete the selected venvs without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Ask before deleting (needs a terminal)
    #[arg(short, long)]
    pub interactive: bool,

    /// Report only (the default); rejects --yes
    #[arg(long, conflicts_with = "yes")]
    pub dry_run: bool,

    /// Output NDJSON events
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Layer the flags that were given over `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(days) = self.min_age_days {
            config.rules.min_age_days = Some(days);
        }
        if let Some(mb) = self.min_size_mb {
            config.rules.min_size_mb = Some(mb);
        }
        if let Some(days) = self.recency_days {
            config.rules.recency_days = Some(days);
        }

        if let Some(sort) = self.sort_by {
            config.selection.sort_by = sort;
        }
        match self.limit {
            Some(0) => config.selection.limit = None,
            Some(n) => config.selection.limit = Some(n),
            None => {}
        }
        config.selection.exclude.extend(self.exclude.iter().cloned());

        if self.no_recursive {
            config.scan.max_depth = 1;
        } else if let Some(depth) = self.max_depth {
            config.scan.max_depth = depth;
        }
        for dir in &self.exclude_dirs {
            if !config.scan.exclude_dirs.contains(dir) {
                config.scan.exclude_dirs.push(dir.clone());
            }
        }
        if let Some(jobs) = self.jobs {
            config.scan.jobs = Some(jobs);
        }
        if let Some(secs) = self.timeout_secs {
            config.scan.timeout_secs = secs;
        }

        if let Some(color) = self.color {
            config.output.color = color;
        }
    }
}
