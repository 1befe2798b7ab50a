//! Configuration module for uv-tidy
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (UV_TIDY_*)
//! 3. Config file (`--config`, else `~/.config/uv-tidy/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning};
pub use types::{
    ColorMode, Config, OutputConfig, RulesConfig, ScanConfig, SelectionConfig,
    DEFAULT_TIMEOUT_SECS, MAX_DEFAULT_JOBS,
};
