//! Tidy Use Case
//!
//! Orchestrates discovery, scanning, evaluation, selection and the
//! execution gate.

mod options;
mod result;
mod use_case;

pub use options::TidyOptions;
pub use result::{SkipReason, SkippedVenv, TidyPlan, TidyReport};
pub use use_case::TidyUseCase;
