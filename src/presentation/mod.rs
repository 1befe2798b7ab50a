//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! Rendering lives in the binary's `ui` module.

pub mod cli;
pub mod factory;

pub use cli::Cli;
pub use factory::{create_tidy_use_case, ConcreteTidyUseCase};
