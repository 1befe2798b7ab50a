//! Tidy result types

use std::fmt;
use std::path::PathBuf;

use crate::domain::entities::{Disposition, ExecutionReport, SelectionResult};
use crate::domain::services::ScanSummary;
use crate::error::{EvaluationError, ScanError};

/// Why a path was left out of evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Root could not be walked (other roots were)
    Root(String),
    /// Discovered, but no longer a venv when inspected
    NotAVenv,
    Scan(ScanError),
    Evaluation(EvaluationError),
}

impl SkipReason {
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Root(_) => "root",
            SkipReason::NotAVenv => "not_a_venv",
            SkipReason::Scan(_) => "scan",
            SkipReason::Evaluation(_) => "evaluation",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Root(message) => write!(f, "{}", message),
            SkipReason::NotAVenv => f.write_str("no longer looks like a venv"),
            SkipReason::Scan(err) => write!(f, "{}", err),
            SkipReason::Evaluation(err) => write!(f, "{}", err),
        }
    }
}

/// A path that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVenv {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl SkippedVenv {
    pub fn new(path: PathBuf, reason: SkipReason) -> Self {
        Self { path, reason }
    }
}

/// Everything known before the execution gate runs
#[derive(Debug, Clone, Default)]
pub struct TidyPlan {
    pub roots: Vec<PathBuf>,
    pub dispositions: Vec<Disposition>,
    pub skipped: Vec<SkippedVenv>,
    pub selection: SelectionResult,
    pub summary: ScanSummary,
}

impl TidyPlan {
    pub fn add_skipped(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedVenv::new(path, reason));
    }

    /// Nothing to act on
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

/// Plan plus what the execution gate did with it
#[derive(Debug, Clone)]
pub struct TidyReport {
    pub plan: TidyPlan,
    pub execution: ExecutionReport,
}

impl TidyReport {
    /// Every selected venv was handled without a deletion failure
    pub fn is_success(&self) -> bool {
        self.execution.is_success()
    }
}
