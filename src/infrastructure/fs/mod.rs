//! File System Implementations
//!
//! Concrete implementations of the FileSystem port, plus home and default
//! root resolution.

mod home;
mod local;
mod roots;

pub use home::{uv_tidy_home_dir, UV_TIDY_TEST_HOME_VAR};
pub use local::{expand_home, LocalFs};
pub use roots::{candidate_roots, default_roots};
