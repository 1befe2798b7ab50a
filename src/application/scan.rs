//! Scan pool
//!
//! Runs the descriptor builder over many paths on a bounded set of worker
//! threads. Workers pull from a shared queue and report back over a
//! channel. The coordinator enforces the per-path timeout: it stops waiting
//! for a path that overran, records `TimedOut`, and spawns a replacement
//! worker so a hung mount cannot starve the queue.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::entities::VenvDescriptor;
use crate::domain::ports::VenvInspector;
use crate::error::ScanError;

/// Extra time granted past the deadline before a path is abandoned
const ABANDON_GRACE: Duration = Duration::from_millis(250);

/// How often the coordinator re-checks deadlines and cancellation
const TICK: Duration = Duration::from_millis(50);

type Job = (usize, PathBuf);
type Queue = Arc<Mutex<VecDeque<Job>>>;
type InspectResult = Result<Option<VenvDescriptor>, ScanError>;

enum Event {
    Started { index: usize, at: Instant },
    Finished { index: usize, result: InspectResult },
}

/// Descriptors and per-path failures, both in input order
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub descriptors: Vec<VenvDescriptor>,
    pub errors: Vec<ScanError>,
    /// Paths that no longer looked like venvs when inspected
    pub not_venvs: Vec<PathBuf>,
}

pub struct ScanPool {
    jobs: usize,
    timeout: Duration,
    cancel: Arc<AtomicBool>,
}

impl ScanPool {
    pub fn new(jobs: usize, timeout: Duration) -> Self {
        Self {
            jobs: jobs.max(1),
            timeout,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a cancellation flag (e.g. set from a Ctrl-C handler)
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn scan(&self, inspector: Arc<dyn VenvInspector>, paths: Vec<PathBuf>) -> ScanOutcome {
        let total = paths.len();
        if total == 0 {
            return ScanOutcome::default();
        }

        let queue: Queue = Arc::new(Mutex::new(paths.iter().cloned().enumerate().collect()));
        let (tx, rx) = mpsc::channel();

        let mut workers = 0;
        for _ in 0..self.jobs.min(total) {
            if self.spawn_worker(&queue, &tx, &inspector) {
                workers += 1;
            }
        }
        if workers == 0 {
            tracing::warn!("no scan worker could be started; scanning inline");
            return self.scan_inline(inspector.as_ref(), &paths);
        }

        let mut results: Vec<Option<InspectResult>> = (0..total).map(|_| None).collect();
        let mut in_flight: HashMap<usize, Instant> = HashMap::new();
        let mut pending = total;

        while pending > 0 {
            if self.cancel.load(Ordering::SeqCst) {
                pending -= self.drain_cancelled(&queue, &mut results);
                if pending == 0 {
                    break;
                }
            }

            match rx.recv_timeout(TICK) {
                Ok(Event::Started { index, at }) => {
                    in_flight.insert(index, at);
                }
                Ok(Event::Finished { index, result }) => {
                    in_flight.remove(&index);
                    if results[index].is_none() {
                        results[index] = Some(self.normalize(result));
                        pending -= 1;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            let overdue: Vec<usize> = in_flight
                .iter()
                .filter(|(_, at)| now.duration_since(**at) > self.timeout + ABANDON_GRACE)
                .map(|(index, _)| *index)
                .collect();
            for index in overdue {
                in_flight.remove(&index);
                if results[index].is_some() {
                    continue;
                }
                tracing::warn!(path = %paths[index].display(), "scan timed out; abandoning path");
                results[index] = Some(Err(ScanError::TimedOut {
                    path: paths[index].clone(),
                    after: self.timeout,
                }));
                pending -= 1;
                self.spawn_worker(&queue, &tx, &inspector);
            }
        }

        collect(results, &paths)
    }

    fn spawn_worker(
        &self,
        queue: &Queue,
        tx: &Sender<Event>,
        inspector: &Arc<dyn VenvInspector>,
    ) -> bool {
        let queue = Arc::clone(queue);
        let tx = tx.clone();
        let inspector = Arc::clone(inspector);
        let cancel = Arc::clone(&self.cancel);
        let timeout = self.timeout;

        let spawned = thread::Builder::new()
            .name("uv-tidy-scan".to_string())
            .spawn(move || worker(queue, tx, inspector, cancel, timeout));

        match spawned {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to spawn scan worker");
                false
            }
        }
    }

    /// Mark every queued path as cancelled; returns how many were drained
    fn drain_cancelled(&self, queue: &Queue, results: &mut [Option<InspectResult>]) -> usize {
        let drained: Vec<Job> = match queue.lock() {
            Ok(mut q) => q.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };
        let mut count = 0;
        for (index, path) in drained {
            if results[index].is_none() {
                results[index] = Some(Err(ScanError::Cancelled(path)));
                count += 1;
            }
        }
        count
    }

    fn scan_inline(&self, inspector: &dyn VenvInspector, paths: &[PathBuf]) -> ScanOutcome {
        let results = paths
            .iter()
            .map(|path| {
                if self.cancel.load(Ordering::SeqCst) {
                    return Some(Err(ScanError::Cancelled(path.clone())));
                }
                let result = inspector.inspect(path, Instant::now() + self.timeout);
                Some(self.normalize(result))
            })
            .collect();
        collect(results, paths)
    }

    /// The builder only knows its deadline; report the configured timeout
    fn normalize(&self, result: InspectResult) -> InspectResult {
        match result {
            Err(ScanError::TimedOut { path, .. }) => Err(ScanError::TimedOut {
                path,
                after: self.timeout,
            }),
            other => other,
        }
    }
}

fn worker(
    queue: Queue,
    tx: Sender<Event>,
    inspector: Arc<dyn VenvInspector>,
    cancel: Arc<AtomicBool>,
    timeout: Duration,
) {
    loop {
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        let job = match queue.lock() {
            Ok(mut q) => q.pop_front(),
            Err(_) => break,
        };
        let Some((index, path)) = job else {
            break;
        };

        let at = Instant::now();
        if tx.send(Event::Started { index, at }).is_err() {
            break;
        }
        tracing::debug!(path = %path.display(), "inspecting");
        let result = inspector.inspect(&path, at + timeout);
        if tx.send(Event::Finished { index, result }).is_err() {
            break;
        }
    }
}

fn collect(results: Vec<Option<InspectResult>>, paths: &[PathBuf]) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for (index, result) in results.into_iter().enumerate() {
        match result.unwrap_or_else(|| Err(ScanError::Cancelled(paths[index].clone()))) {
            Ok(Some(descriptor)) => outcome.descriptors.push(descriptor),
            Ok(None) => {
                tracing::info!(path = %paths[index].display(), "not a venv; skipping path");
                outcome.not_venvs.push(paths[index].clone());
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping path");
                outcome.errors.push(err);
            }
        }
    }
    outcome
}
