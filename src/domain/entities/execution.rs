//! Execution report entities

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::ExecutionMode;
use crate::error::DeletionError;

/// What happened to one selected venv
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Dry run: nothing touched
    WouldRemove,
    Removed,
    Failed(DeletionError),
}

impl ExecutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionOutcome::WouldRemove => "would_remove",
            ExecutionOutcome::Removed => "removed",
            ExecutionOutcome::Failed(_) => "failed",
        }
    }

    pub fn error(&self) -> Option<&DeletionError> {
        match self {
            ExecutionOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl Serialize for ExecutionOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionEntry {
    pub path: PathBuf,
    pub size_kb: Option<u64>,
    pub outcome: ExecutionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionEntry {
    pub fn new(path: PathBuf, size_kb: Option<u64>, outcome: ExecutionOutcome) -> Self {
        let error = outcome.error().map(ToString::to_string);
        Self {
            path,
            size_kb,
            outcome,
            error,
        }
    }
}

/// Per-item report of an execution pass, in selection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub mode: ExecutionMode,
    pub entries: Vec<ExecutionEntry>,
}

impl ExecutionReport {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ExecutionEntry) {
        self.entries.push(entry);
    }

    /// Deletions actually tried (zero in dry run)
    pub fn attempted(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !matches!(e.outcome, ExecutionOutcome::WouldRemove))
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ExecutionOutcome::Removed))
            .count()
    }

    pub fn failed(&self) -> Vec<(&PathBuf, &DeletionError)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.error().map(|err| (&e.path, err)))
            .collect()
    }

    /// KiB freed by successful removals
    pub fn reclaimed_kb(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ExecutionOutcome::Removed))
            .filter_map(|e| e.size_kb)
            .sum()
    }

    /// KiB that a confirmed run would free
    pub fn reclaimable_kb(&self) -> u64 {
        self.entries.iter().filter_map(|e| e.size_kb).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed().is_empty()
    }
}
