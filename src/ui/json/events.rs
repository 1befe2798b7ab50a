//! JSON event types for `--json` output.
//!
//! Every event carries an `event` tag; field names are stable.

use std::path::{Path, PathBuf};

use serde::Serialize;

use uv_tidy::application::{SkippedVenv, TidyReport};
use uv_tidy::domain::entities::{AccessPattern, DroppedCandidate, Disposition, ExecutionEntry};
use uv_tidy::domain::value_objects::{Confidence, ExecutionMode, Verdict};

/// Event emitted when a run starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub version: &'static str,
    pub mode: ExecutionMode,
    pub roots: &'a [PathBuf],
}

impl<'a> StartEvent<'a> {
    pub fn new(mode: ExecutionMode, roots: &'a [PathBuf]) -> Self {
        Self {
            event: "start",
            version: env!("CARGO_PKG_VERSION"),
            mode,
            roots,
        }
    }
}

/// One event per evaluated venv.
#[derive(Debug, Clone, Serialize)]
pub struct VenvEvent<'a> {
    pub event: &'static str,
    pub path: &'a Path,
    pub verdict: Verdict,
    pub score: u32,
    pub confidence: Confidence,
    pub age_days: Option<u64>,
    pub last_access_days: Option<u64>,
    pub access_pattern: AccessPattern,
    pub size_kb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corruption: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_version: Option<&'a str>,
    pub reasons: Vec<&'static str>,
    pub messages: Vec<&'a str>,
}

impl<'a> From<&'a Disposition> for VenvEvent<'a> {
    fn from(disposition: &'a Disposition) -> Self {
        let d = disposition.descriptor();
        Self {
            event: "venv",
            path: &d.path,
            verdict: disposition.verdict(),
            score: disposition.score(),
            confidence: disposition.confidence(),
            age_days: d.age_days,
            last_access_days: d.last_access_days,
            access_pattern: d.access_pattern(),
            size_kb: d.size_kb,
            corruption: d.corruption.map(|c| c.as_str()),
            python_version: d.python_version.as_deref(),
            reasons: disposition.reason_codes().map(|c| c.as_str()).collect(),
            messages: disposition
                .reasons()
                .iter()
                .map(|r| r.message.as_str())
                .collect(),
        }
    }
}

/// A path that could not be scanned or evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEvent<'a> {
    pub event: &'static str,
    pub path: &'a Path,
    pub kind: &'static str,
    pub reason: String,
}

impl<'a> From<&'a SkippedVenv> for SkippedEvent<'a> {
    fn from(skipped: &'a SkippedVenv) -> Self {
        Self {
            event: "skipped",
            path: &skipped.path,
            kind: skipped.reason.kind(),
            reason: skipped.reason.to_string(),
        }
    }
}

/// A removal candidate the selection pipeline left out.
#[derive(Debug, Clone, Serialize)]
pub struct DroppedEvent<'a> {
    pub event: &'static str,
    pub path: &'a Path,
    pub reason: &'static str,
}

impl<'a> From<&'a DroppedCandidate> for DroppedEvent<'a> {
    fn from(dropped: &'a DroppedCandidate) -> Self {
        Self {
            event: "dropped",
            path: &dropped.disposition.descriptor().path,
            reason: dropped.reason.as_str(),
        }
    }
}

/// Outcome for one selected venv.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalEvent<'a> {
    pub event: &'static str,
    #[serde(flatten)]
    pub entry: &'a ExecutionEntry,
}

impl<'a> From<&'a ExecutionEntry> for RemovalEvent<'a> {
    fn from(entry: &'a ExecutionEntry) -> Self {
        Self {
            event: "removal",
            entry,
        }
    }
}

/// Event emitted when a run completes.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent {
    pub event: &'static str,
    pub success: bool,
    pub mode: ExecutionMode,
    pub found: usize,
    pub to_remove: usize,
    pub to_keep: usize,
    pub corrupted: usize,
    pub skipped: usize,
    pub selected: usize,
    pub removed: usize,
    pub failed: usize,
    pub reclaimable_kb: u64,
    pub reclaimed_kb: u64,
    pub oldest_candidate_days: Option<u64>,
    pub newest_candidate_days: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl CompleteEvent {
    pub fn new(report: &TidyReport) -> Self {
        let summary = &report.plan.summary;
        let execution = &report.execution;
        Self {
            event: "complete",
            success: report.is_success(),
            mode: execution.mode,
            found: summary.found,
            to_remove: summary.to_remove,
            to_keep: summary.to_keep,
            corrupted: summary.corrupted,
            skipped: report.plan.skipped.len(),
            selected: report.plan.selection.len(),
            removed: execution.succeeded(),
            failed: execution.failed().len(),
            reclaimable_kb: summary.reclaimable_kb,
            reclaimed_kb: execution.reclaimed_kb(),
            oldest_candidate_days: summary.oldest_candidate_days,
            newest_candidate_days: summary.newest_candidate_days,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Event emitted when the run fails before producing a report.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub event: &'static str,
    pub message: String,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            event: "error",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uv_tidy::domain::value_objects::{Reason, ReasonCode};
    use uv_tidy::domain::entities::VenvDescriptor;

    #[test]
    fn venv_event_lists_reason_codes() {
        let disposition = Disposition::new(
            VenvDescriptor::new("/srv/old").with_age_days(90).with_size_kb(10),
            Verdict::Remove,
            vec![Reason::new(ReasonCode::AgeThreshold, "unused for 90 days (>= 30)")],
            30,
            Confidence::High,
        );

        let json = serde_json::to_value(VenvEvent::from(&disposition)).unwrap();
        assert_eq!(json["event"], "venv");
        assert_eq!(json["verdict"], "remove");
        assert_eq!(json["reasons"][0], "age_threshold");
        assert_eq!(json["access_pattern"], "stale");
        assert!(json.get("corruption").is_none());
    }

    #[test]
    fn error_event_has_tag() {
        let json = serde_json::to_value(ErrorEvent::new("boom")).unwrap();
        assert_eq!(json["event"], "error");
        assert_eq!(json["message"], "boom");
    }
}
