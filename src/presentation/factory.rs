//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{TidyOptions, TidyUseCase};
use crate::infrastructure::{FsVenvInspector, LocalFs, WalkdirLocator};

/// Type alias for the concrete TidyUseCase with all dependencies
pub type ConcreteTidyUseCase = TidyUseCase<WalkdirLocator, LocalFs>;

/// Create a tidy use case with all dependencies wired up
///
/// Discovery depth and skipped directory names come from `options`.
pub fn create_tidy_use_case(options: &TidyOptions) -> ConcreteTidyUseCase {
    let locator = WalkdirLocator::new()
        .with_max_depth(options.max_depth)
        .with_exclude_dirs(options.exclude_dirs.clone());
    let inspector = Arc::new(FsVenvInspector::new());

    TidyUseCase::new(locator, inspector, LocalFs::new()).with_delete_jobs(options.jobs)
}
