//! JSON output utilities for the CLI.
//!
//! One event object per line (NDJSON) on stdout. Event types live in
//! `events`; `emit_report` writes the whole stream for a finished run.

pub mod events;

use serde::Serialize;
use std::io::{self, Write};

use uv_tidy::application::TidyReport;

use events::*;

/// Write a typed event to a custom writer.
pub fn write_typed_event<T: Serialize, W: Write>(out: &mut W, event: &T) -> io::Result<()> {
    let json =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Emit a typed event as NDJSON to stdout.
pub fn emit_event<T: Serialize>(event: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_typed_event(&mut out, event)
}

/// Write every event of a finished run, `start` through `complete`.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &TidyReport,
    duration_ms: u64,
) -> io::Result<()> {
    let plan = &report.plan;
    write_typed_event(out, &StartEvent::new(report.execution.mode, &plan.roots))?;

    for disposition in &plan.dispositions {
        write_typed_event(out, &VenvEvent::from(disposition))?;
    }
    for skipped in &plan.skipped {
        write_typed_event(out, &SkippedEvent::from(skipped))?;
    }
    for dropped in plan.selection.dropped() {
        write_typed_event(out, &DroppedEvent::from(dropped))?;
    }
    for entry in &report.execution.entries {
        write_typed_event(out, &RemovalEvent::from(entry))?;
    }

    write_typed_event(out, &CompleteEvent::new(report).with_duration(duration_ms))
}

/// Write the report stream to stdout.
pub fn emit_report(report: &TidyReport, duration_ms: u64) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_report(&mut out, report, duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uv_tidy::application::TidyPlan;
    use uv_tidy::domain::entities::{ExecutionEntry, ExecutionOutcome, ExecutionReport};
    use uv_tidy::domain::value_objects::ExecutionMode;
    use uv_tidy::error::DeletionError;

    fn report() -> TidyReport {
        let plan = TidyPlan {
            roots: vec![PathBuf::from("/srv")],
            ..Default::default()
        };
        let mut execution = ExecutionReport::new(ExecutionMode::Confirmed);
        execution.push(ExecutionEntry::new(
            PathBuf::from("/srv/a"),
            Some(2048),
            ExecutionOutcome::Removed,
        ));
        execution.push(ExecutionEntry::new(
            PathBuf::from("/srv/b"),
            None,
            ExecutionOutcome::Failed(DeletionError::PermissionDenied),
        ));
        TidyReport { plan, execution }
    }

    #[test]
    fn report_is_ndjson_from_start_to_complete() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &report(), 12).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let events: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["mode"], "confirmed");
        assert_eq!(events[1]["event"], "removal");
        assert_eq!(events[1]["outcome"], "removed");
        assert_eq!(events[2]["error"], "permission denied");
        assert_eq!(events[3]["event"], "complete");
        assert_eq!(events[3]["removed"], 1);
        assert_eq!(events[3]["failed"], 1);
        assert_eq!(events[3]["reclaimed_kb"], 2048);
        assert_eq!(events[3]["duration_ms"], 12);
    }
}
