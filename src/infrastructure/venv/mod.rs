//! Venv inspection on the local filesystem

mod builder;
mod discovery;
mod git;
pub mod layout;

pub use builder::FsVenvInspector;
pub use discovery::{WalkdirLocator, DEFAULT_EXCLUDE_DIRS, DEFAULT_MAX_DEPTH};
pub use layout::Layout;
