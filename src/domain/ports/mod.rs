//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod venv_inspector;

pub use file_system::{EntryKind, FileSystem, FsError, FsResult};
pub use venv_inspector::{VenvInspector, VenvLocator};
