//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system, home directory and default roots
//! - `venv/` - Venv layout detection, descriptor builder, discovery, git status check

pub mod fs;
pub mod venv;

// Re-export for convenience
pub use fs::{default_roots, LocalFs};
pub use venv::{FsVenvInspector, WalkdirLocator};
