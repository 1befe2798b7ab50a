//! Domain Entities
//!
//! - `VenvDescriptor` - read-only snapshot of one venv directory
//! - `Disposition` - the rule engine's verdict on a descriptor
//! - `SelectionResult` - removal candidates after filter/sort/limit
//! - `ExecutionReport` - per-item outcome of the execution gate

mod descriptor;
mod disposition;
mod execution;
mod selection;

pub use descriptor::{AccessPattern, AgeSource, CorruptionType, VenvDescriptor};
pub use disposition::Disposition;
pub use execution::{ExecutionEntry, ExecutionOutcome, ExecutionReport};
pub use selection::{DropReason, DroppedCandidate, SelectionResult};
