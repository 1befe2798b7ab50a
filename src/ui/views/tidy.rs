//! Tidy command UI views
//!
//! Header, candidate listing and the closing summary.

use std::path::PathBuf;

use uv_tidy::application::{TidyOptions, TidyPlan, TidyReport};
use uv_tidy::domain::entities::Disposition;
use uv_tidy::domain::value_objects::{format_size_kb, ExecutionMode};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render the tidy command header
pub fn render_tidy_header(
    roots: &[PathBuf],
    options: &TidyOptions,
    mode: ExecutionMode,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = match mode {
        ExecutionMode::DryRun => "uv-tidy (Dry Run)",
        ExecutionMode::Confirmed => "uv-tidy",
    };
    let mut header = CommandHeader::new(Icon::Scan, title);

    let roots = roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    header.add("Roots", roots);
    header.add("Min age", format!("{} days", options.rules.min_age_days));
    if let Some(kb) = options.rules.min_size_kb {
        header.add("Min size", format_size_kb(kb));
    }
    header.add("Sort", options.sort.as_str());
    if let Some(limit) = options.limit {
        header.add("Limit", limit.to_string());
    }

    header.render(supports_color, supports_unicode)
}

fn describe(disposition: &Disposition) -> String {
    let d = disposition.descriptor();
    let age = d
        .age_days
        .map(|a| format!("{}d", a))
        .unwrap_or_else(|| "?".to_string());
    let size = d.size_kb.map(format_size_kb).unwrap_or_else(|| "?".to_string());
    let reasons = disposition
        .reasons()
        .iter()
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "{}  {} ({})  {}  {}",
        d.path.display(),
        age,
        d.access_pattern(),
        size,
        reasons
    )
}

/// Render removal candidates, then what was kept, dropped or skipped.
///
/// Kept venvs are listed only when `verbose` is set.
pub fn render_plan(
    plan: &TidyPlan,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    if !plan.selection.is_empty() {
        out.push_str(
            &ColoredText::warning("Removal candidates:")
                .bold()
                .render(supports_color),
        );
        out.push('\n');
        for disposition in plan.selection.selected() {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Remove.colored(supports_color, supports_unicode),
                describe(disposition)
            ));
        }
    }

    if verbose > 0 {
        let kept: Vec<_> = plan.dispositions.iter().filter(|d| !d.is_remove()).collect();
        if !kept.is_empty() {
            out.push('\n');
            out.push_str(&ColoredText::dim("Kept:").render(supports_color));
            out.push('\n');
            for disposition in kept {
                out.push_str(&format!(
                    "  {} {}\n",
                    Icon::Keep.colored(supports_color, supports_unicode),
                    describe(disposition)
                ));
            }
        }
    }

    if !plan.selection.dropped().is_empty() {
        out.push('\n');
        out.push_str(&ColoredText::dim("Not selected:").render(supports_color));
        out.push('\n');
        for dropped in plan.selection.dropped() {
            out.push_str(&format!(
                "  - {} ({})\n",
                dropped.disposition.descriptor().path.display(),
                dropped.reason.as_str()
            ));
        }
    }

    if !plan.skipped.is_empty() {
        out.push('\n');
        out.push_str(&ColoredText::dim("Skipped:").render(supports_color));
        out.push('\n');
        for skipped in &plan.skipped {
            out.push_str(&format!(
                "  {} {} ({})\n",
                Icon::Warning.colored(supports_color, supports_unicode),
                skipped.path.display(),
                skipped.reason
            ));
        }
    }

    out
}

/// Render the closing summary
pub fn render_tidy_result(
    report: &TidyReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let plan = &report.plan;
    let execution = &report.execution;
    let dry_run = execution.mode.is_dry_run();
    let failed = execution.failed();

    let title = if plan.selection.is_empty() {
        "Nothing to Remove"
    } else if dry_run {
        "Dry Run Complete"
    } else if failed.is_empty() {
        "Tidy Complete"
    } else {
        "Tidy Finished With Errors"
    };

    let mut summary = if failed.is_empty() {
        ResultSummary::success(title)
    } else {
        ResultSummary::partial(title)
    };

    summary.add_stat("venvs found", plan.summary.found);
    if dry_run {
        summary.add_stat("would be removed", plan.selection.len());
        summary.add_stat("would be reclaimed", format_size_kb(execution.reclaimable_kb()));
    } else {
        summary.add_stat("removed", execution.succeeded());
        summary.add_stat("reclaimed", format_size_kb(execution.reclaimed_kb()));
        if !failed.is_empty() {
            summary.add_stat("failed", failed.len());
        }
    }
    if !plan.skipped.is_empty() {
        summary.add_stat("skipped", plan.skipped.len());
    }

    for (path, error) in &failed {
        summary.add_warning(format!("{}: {}", path.display(), error));
    }

    if dry_run && !plan.selection.is_empty() {
        summary.with_next_step("Run with --yes (or --interactive) to delete");
    }

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uv_tidy::application::TidyUseCase;
    use uv_tidy::domain::entities::{ExecutionEntry, ExecutionOutcome, ExecutionReport};
    use uv_tidy::domain::ports::{VenvInspector, VenvLocator};
    use uv_tidy::domain::entities::VenvDescriptor;
    use uv_tidy::error::{DeletionError, ScanError, TidyError};
    use uv_tidy::infrastructure::LocalFs;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Instant;

    struct FixedLocator(Vec<PathBuf>);

    impl VenvLocator for FixedLocator {
        fn locate(&self, _root: &Path) -> Result<Vec<PathBuf>, TidyError> {
            Ok(self.0.clone())
        }
    }

    struct FixedInspector;

    impl VenvInspector for FixedInspector {
        fn inspect(
            &self,
            path: &Path,
            _deadline: Instant,
        ) -> Result<Option<VenvDescriptor>, ScanError> {
            let age = if path.ends_with("fresh") { 1 } else { 400 };
            Ok(Some(
                VenvDescriptor::new(path)
                    .with_age_days(age)
                    .with_last_access_days(age)
                    .with_size_kb(3000),
            ))
        }
    }

    fn plan() -> TidyPlan {
        let use_case = TidyUseCase::new(
            FixedLocator(vec![PathBuf::from("/srv/old"), PathBuf::from("/srv/fresh")]),
            Arc::new(FixedInspector),
            LocalFs::new(),
        );
        let options = TidyOptions::new().with_roots(vec![PathBuf::from("/srv")]);
        use_case.plan(&options).unwrap()
    }

    #[test]
    fn header_shows_dry_run_and_roots() {
        let options = TidyOptions::new();
        let rendered = render_tidy_header(
            &[PathBuf::from("/srv")],
            &options,
            ExecutionMode::DryRun,
            false,
            false,
        );
        assert!(rendered.contains("Dry Run"));
        assert!(rendered.contains("/srv"));
        assert!(rendered.contains("30 days"));
    }

    #[test]
    fn plan_lists_candidates_with_reasons() {
        let rendered = render_plan(&plan(), 0, false, false);
        assert!(rendered.contains("[x] /srv/old  400d (abandoned)  2.9 MB  unused for 400 days"));
        assert!(!rendered.contains("/srv/fresh"));
    }

    #[test]
    fn verbose_plan_lists_kept() {
        let rendered = render_plan(&plan(), 1, false, false);
        assert!(rendered.contains("[ ] /srv/fresh  1d (recent)"));
    }

    #[test]
    fn dry_run_summary_points_at_yes() {
        let plan = plan();
        let mut execution = ExecutionReport::new(ExecutionMode::DryRun);
        execution.push(ExecutionEntry::new(
            PathBuf::from("/srv/old"),
            Some(3000),
            ExecutionOutcome::WouldRemove,
        ));
        let report = TidyReport { plan, execution };

        let rendered = render_tidy_result(&report, false, false);
        assert!(rendered.contains("1 would be removed"));
        assert!(rendered.contains("--yes"));
    }

    #[test]
    fn failures_make_a_partial_summary() {
        let plan = plan();
        let mut execution = ExecutionReport::new(ExecutionMode::Confirmed);
        execution.push(ExecutionEntry::new(
            PathBuf::from("/srv/old"),
            Some(3000),
            ExecutionOutcome::Failed(DeletionError::PermissionDenied),
        ));
        let report = TidyReport { plan, execution };

        let rendered = render_tidy_result(&report, false, false);
        assert!(rendered.contains("[WARN] Tidy Finished With Errors"));
        assert!(rendered.contains("/srv/old: permission denied"));
    }
}
