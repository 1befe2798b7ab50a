//! Tidy Use Case
//!
//! Runs one pass: locate venvs under each root, inspect them on the scan
//! pool, evaluate, select, and hand the selection to the execution gate.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::execute::ExecutionGate;
use crate::application::scan::ScanPool;
use crate::domain::entities::ExecutionReport;
use crate::domain::policies::RuleSet;
use crate::domain::ports::{FileSystem, VenvInspector, VenvLocator};
use crate::domain::services::{evaluate_all, select, ScanSummary};
use crate::domain::value_objects::ExecutionMode;
use crate::error::{TidyError, TidyResult};

use super::options::TidyOptions;
use super::result::{SkipReason, TidyPlan, TidyReport};

/// Tidy use case - finds, evaluates and (optionally) removes venvs
pub struct TidyUseCase<L, FS>
where
    L: VenvLocator,
    FS: FileSystem,
{
    locator: L,
    inspector: Arc<dyn VenvInspector>,
    gate: ExecutionGate<FS>,
    rules: RuleSet,
    cancel: Arc<AtomicBool>,
}

impl<L, FS> TidyUseCase<L, FS>
where
    L: VenvLocator,
    FS: FileSystem,
{
    /// Create a new tidy use case with the standard rule set
    pub fn new(locator: L, inspector: Arc<dyn VenvInspector>, fs: FS) -> Self {
        Self {
            locator,
            inspector,
            gate: ExecutionGate::new(fs),
            rules: RuleSet::standard(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Worker count used for deletions
    pub fn with_delete_jobs(mut self, jobs: usize) -> Self {
        self.gate = self.gate.with_jobs(jobs);
        self
    }

    /// Discover, scan, evaluate and select. Read-only.
    ///
    /// Fails when no root is given or none of them can be walked.
    pub fn plan(&self, options: &TidyOptions) -> TidyResult<TidyPlan> {
        if options.roots.is_empty() {
            return Err(TidyError::NoRoots);
        }

        let mut plan = TidyPlan::default();
        let mut seen = BTreeSet::new();
        let mut paths: Vec<PathBuf> = Vec::new();
        let mut first_failure = None;
        let mut walked = 0;

        for root in &options.roots {
            // Descriptor paths must be absolute for exclude globs and dedup
            let root = match absolute_root(root) {
                Ok(root) => root,
                Err(err) => {
                    tracing::warn!(root = %root.display(), error = %err, "cannot scan root");
                    plan.add_skipped(root.clone(), SkipReason::Root(err.to_string()));
                    first_failure.get_or_insert(err);
                    continue;
                }
            };
            if plan.roots.contains(&root) {
                continue;
            }
            plan.roots.push(root.clone());

            match self.locator.locate(&root) {
                Ok(found) => {
                    walked += 1;
                    for path in found {
                        if seen.insert(path.clone()) {
                            paths.push(path);
                        }
                    }
                }
                Err(err @ TidyError::RootUnavailable { .. }) => {
                    tracing::warn!(root = %root.display(), error = %err, "cannot scan root");
                    plan.add_skipped(root, SkipReason::Root(err.to_string()));
                    first_failure.get_or_insert(err);
                }
                Err(err) => return Err(err),
            }
        }

        if walked == 0 {
            return Err(first_failure.unwrap_or(TidyError::NoRoots));
        }

        tracing::info!(count = paths.len(), "scanning candidate venvs");
        let pool = ScanPool::new(options.jobs, options.timeout)
            .with_cancel_flag(Arc::clone(&self.cancel));
        let outcome = pool.scan(Arc::clone(&self.inspector), paths);

        for path in outcome.not_venvs {
            plan.add_skipped(path, SkipReason::NotAVenv);
        }
        for err in outcome.errors {
            plan.add_skipped(err.path().to_path_buf(), SkipReason::Scan(err));
        }

        let (dispositions, eval_errors) =
            evaluate_all(&outcome.descriptors, &self.rules, &options.rules);
        for err in eval_errors {
            plan.add_skipped(err.path().to_path_buf(), SkipReason::Evaluation(err));
        }

        plan.selection = select(&dispositions, &options.filters, options.sort, options.limit);
        plan.summary = ScanSummary::from_dispositions(&dispositions, plan.skipped.len());
        plan.dispositions = dispositions;

        tracing::info!(
            found = plan.summary.found,
            selected = plan.selection.len(),
            dropped = plan.selection.dropped().len(),
            skipped = plan.skipped.len(),
            "plan ready"
        );
        Ok(plan)
    }

    /// Pass the plan's selection through the execution gate.
    ///
    /// Nothing is deleted unless `mode` is [`ExecutionMode::Confirmed`].
    pub fn apply(&self, plan: &TidyPlan, mode: ExecutionMode) -> ExecutionReport {
        self.gate.execute(&plan.selection, mode)
    }

    /// Plan then apply
    pub fn run(&self, options: &TidyOptions, mode: ExecutionMode) -> TidyResult<TidyReport> {
        let plan = self.plan(options)?;
        let execution = self.apply(&plan, mode);
        Ok(TidyReport { plan, execution })
    }
}

fn absolute_root(root: &Path) -> TidyResult<PathBuf> {
    std::path::absolute(root).map_err(|e| TidyError::RootUnavailable {
        path: root.to_path_buf(),
        message: e.to_string(),
    })
}
