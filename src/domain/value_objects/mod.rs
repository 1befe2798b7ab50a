//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod exclude_patterns;
mod execution_mode;
mod reason;
mod size;
mod sort_key;
mod verdict;

pub use exclude_patterns::ExcludePatterns;
pub use execution_mode::ExecutionMode;
pub use reason::{Reason, ReasonCode};
pub use size::{format_size_kb, LARGE_FOOTPRINT_KB};
pub use sort_key::SortKey;
pub use verdict::{Confidence, Verdict};
