//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `TidyUseCase` - locate, scan, evaluate, select, execute
//!
//! ## Services
//!
//! - `ScanPool` - bounded worker pool running the descriptor builder
//! - `ExecutionGate` - dry-run or confirmed deletion of a selection

pub mod execute;
pub mod scan;
pub mod tidy;

pub use execute::ExecutionGate;
pub use scan::{ScanOutcome, ScanPool};
pub use tidy::{SkipReason, SkippedVenv, TidyOptions, TidyPlan, TidyReport, TidyUseCase};
