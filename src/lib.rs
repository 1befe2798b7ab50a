//! uv-tidy - find, evaluate and safely remove unused uv virtual environments
//!
//! A scan builds a read-only descriptor for every venv under the given roots,
//! a rule engine turns each descriptor into a keep/remove disposition with
//! reasons, and a selection pipeline filters, sorts and limits the removal
//! candidates. Nothing is deleted unless the run is explicitly confirmed.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{TidyOptions, TidyPlan, TidyReport, TidyUseCase};
pub use config::Config;
pub use domain::value_objects::{ExecutionMode, SortKey, Verdict};
pub use error::{ConfigError, TidyError, TidyResult};
