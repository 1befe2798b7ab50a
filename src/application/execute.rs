//! Execution gate
//!
//! The only code path that deletes anything. Dry run is the default and
//! never touches the filesystem port; confirmed mode deletes each selected
//! venv independently on a bounded set of scoped threads.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::domain::entities::{ExecutionEntry, ExecutionOutcome, ExecutionReport, SelectionResult};
use crate::domain::ports::{EntryKind, FileSystem};
use crate::domain::value_objects::ExecutionMode;
use crate::error::DeletionError;

pub struct ExecutionGate<FS: FileSystem> {
    fs: FS,
    jobs: usize,
}

impl<FS: FileSystem> ExecutionGate<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs, jobs: 1 }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Report (dry run) or delete (confirmed) every selected venv.
    ///
    /// Entries follow selection order. A failed deletion is recorded and
    /// the rest continue.
    pub fn execute(&self, selection: &SelectionResult, mode: ExecutionMode) -> ExecutionReport {
        let mut report = ExecutionReport::new(mode);
        let selected = selection.selected();

        if mode.is_dry_run() {
            for disposition in selected {
                let d = disposition.descriptor();
                report.push(ExecutionEntry::new(
                    d.path.clone(),
                    d.size_kb,
                    ExecutionOutcome::WouldRemove,
                ));
            }
            return report;
        }

        let outcomes: Mutex<Vec<Option<ExecutionOutcome>>> =
            Mutex::new((0..selected.len()).map(|_| None).collect());
        let next = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..self.jobs.min(selected.len()) {
                scope.spawn(|| loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(disposition) = selected.get(index) else {
                        break;
                    };
                    let outcome = self.remove_one(&disposition.descriptor().path);
                    if let Ok(mut slots) = outcomes.lock() {
                        slots[index] = Some(outcome);
                    }
                });
            }
        });

        let outcomes = outcomes
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for (disposition, outcome) in selected.iter().zip(outcomes) {
            let d = disposition.descriptor();
            let outcome = outcome.unwrap_or_else(|| {
                ExecutionOutcome::Failed(DeletionError::Io("deletion did not run".to_string()))
            });
            report.push(ExecutionEntry::new(d.path.clone(), d.size_kb, outcome));
        }
        report
    }

    fn remove_one(&self, path: &Path) -> ExecutionOutcome {
        let result = match self.fs.entry_kind(path) {
            Ok(EntryKind::Directory) => self.fs.remove_dir_all(path).map_err(DeletionError::from),
            Ok(EntryKind::Symlink | EntryKind::File) => Err(DeletionError::NotADirectory),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed venv");
                ExecutionOutcome::Removed
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to remove venv");
                ExecutionOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CorruptionType, Disposition, VenvDescriptor};
    use crate::domain::ports::{FsError, FsResult};
    use crate::domain::services::{select, SelectionFilters};
    use crate::domain::value_objects::{Confidence, SortKey, Verdict};
    use crate::infrastructure::fs::LocalFs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Records every call; never touches disk
    #[derive(Default)]
    struct RecordingFs {
        calls: Mutex<Vec<String>>,
    }

    impl FileSystem for RecordingFs {
        fn entry_kind(&self, path: &Path) -> FsResult<EntryKind> {
            self.calls.lock().unwrap().push(format!("kind {}", path.display()));
            Ok(EntryKind::Directory)
        }

        fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
            self.calls.lock().unwrap().push(format!("remove {}", path.display()));
            if path.ends_with("locked") {
                return Err(FsError::PermissionDenied(path.to_path_buf()));
            }
            Ok(())
        }
    }

    fn selection_of(paths: &[PathBuf]) -> SelectionResult {
        let dispositions: Vec<_> = paths
            .iter()
            .map(|p| {
                Disposition::new(
                    VenvDescriptor::new(p).with_age_days(100).with_size_kb(10),
                    Verdict::Remove,
                    Vec::new(),
                    30,
                    Confidence::High,
                )
            })
            .collect();
        select(&dispositions, &SelectionFilters::default(), SortKey::Age, None)
    }

    #[test]
    fn dry_run_never_calls_the_filesystem() {
        let gate = ExecutionGate::new(RecordingFs::default());
        let selection = selection_of(&[PathBuf::from("/a"), PathBuf::from("/b")]);

        let report = gate.execute(&selection, ExecutionMode::DryRun);

        assert!(gate.fs.calls.lock().unwrap().is_empty());
        assert_eq!(report.entries.len(), 2);
        assert!(report
            .entries
            .iter()
            .all(|e| e.outcome == ExecutionOutcome::WouldRemove));
        assert_eq!(report.attempted(), 0);
    }

    #[test]
    fn corrupted_candidate_is_not_deleted_without_confirmation() {
        let disposition = Disposition::new(
            VenvDescriptor::new("/broken").with_corruption(CorruptionType::MissingPython),
            Verdict::Remove,
            Vec::new(),
            50,
            Confidence::High,
        );
        let selection = select(
            &[disposition],
            &SelectionFilters::default(),
            SortKey::Age,
            None,
        );
        let gate = ExecutionGate::new(RecordingFs::default());

        gate.execute(&selection, ExecutionMode::default());

        assert!(gate.fs.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn failure_does_not_abort_batch() {
        let gate = ExecutionGate::new(RecordingFs::default()).with_jobs(2);
        let selection = selection_of(&[
            PathBuf::from("/a"),
            PathBuf::from("/b/locked"),
            PathBuf::from("/c"),
        ]);

        let report = gate.execute(&selection, ExecutionMode::Confirmed);

        let outcomes: Vec<_> = report.entries.iter().map(|e| e.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                ExecutionOutcome::Removed,
                ExecutionOutcome::Failed(DeletionError::PermissionDenied),
                ExecutionOutcome::Removed,
            ]
        );
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.succeeded(), 2);
    }

    #[test]
    fn confirmed_removes_directories() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::create_dir_all(a.join("bin")).unwrap();
        std::fs::create_dir_all(&b).unwrap();
        let missing = dir.path().join("missing");

        let gate = ExecutionGate::new(LocalFs::new()).with_jobs(4);
        let report = gate.execute(
            &selection_of(&[a.clone(), b.clone(), missing]),
            ExecutionMode::Confirmed,
        );

        assert!(!a.exists());
        assert!(!b.exists());
        assert_eq!(report.succeeded(), 2);
        assert_eq!(
            report.entries[2].outcome,
            ExecutionOutcome::Failed(DeletionError::Missing)
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_venv_is_refused() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir_all(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let gate = ExecutionGate::new(LocalFs::new());
        let report = gate.execute(&selection_of(&[link.clone()]), ExecutionMode::Confirmed);

        assert_eq!(
            report.entries[0].outcome,
            ExecutionOutcome::Failed(DeletionError::NotADirectory)
        );
        assert!(real.exists());
        assert!(link.exists());
    }
}
