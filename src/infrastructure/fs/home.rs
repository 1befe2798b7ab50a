//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the system API rather than
//! environment variables, so setting `HOME` in tests has no effect there.
//! `uv_tidy_home_dir()` checks `UV_TIDY_TEST_HOME` first and only then falls
//! back to `dirs::home_dir()`.
//!
//! Use it for every functional path (default scan roots, config file).
//! Tilde expansion of user-provided paths keeps using the real home.

use std::path::PathBuf;

/// Environment variable for test isolation of home directory.
pub const UV_TIDY_TEST_HOME_VAR: &str = "UV_TIDY_TEST_HOME";

/// Get the home directory for uv-tidy paths.
///
/// # Example
///
/// ```
/// use uv_tidy::infrastructure::fs::uv_tidy_home_dir;
///
/// if let Some(home) = uv_tidy_home_dir() {
///     let venvs = home.join(".uv/venvs");
///     # let _ = venvs;
/// }
/// ```
pub fn uv_tidy_home_dir() -> Option<PathBuf> {
    home_dir_from(std::env::var(UV_TIDY_TEST_HOME_VAR).ok())
}

fn home_dir_from(test_home: Option<String>) -> Option<PathBuf> {
    test_home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
