//! Domain Services
//!
//! Pure business logic over domain entities. No I/O.

pub mod rule_engine;
mod selector;
mod summary;

pub use rule_engine::{evaluate, evaluate_all};
pub use selector::{select, SelectionFilters};
pub use summary::ScanSummary;
