//! Execution mode - the two states of the execution gate

use std::fmt;

use serde::Serialize;

/// Whether the execution gate may touch the filesystem.
///
/// `DryRun` is the default. `Confirmed` is only produced from an explicit
/// caller decision via [`ExecutionMode::from_confirmation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    DryRun,
    Confirmed,
}

impl ExecutionMode {
    pub fn from_confirmation(confirmed: bool) -> Self {
        if confirmed {
            ExecutionMode::Confirmed
        } else {
            ExecutionMode::DryRun
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, ExecutionMode::DryRun)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::DryRun => write!(f, "dry run"),
            ExecutionMode::Confirmed => write!(f, "confirmed"),
        }
    }
}
