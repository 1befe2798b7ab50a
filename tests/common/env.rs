//! Test environment for isolated uv-tidy runs.
//!
//! Provides `TestEnv` - temp directories for the scan root and for HOME,
//! plus helpers to run the `uv-tidy` binary against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running the uv-tidy binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({}): {}", e, l))
            })
            .collect()
    }

    /// Events with the given `event` tag
    pub fn events_of(&self, kind: &str) -> Vec<serde_json::Value> {
        self.events()
            .into_iter()
            .filter(|e| e["event"] == kind)
            .collect()
    }
}

/// Isolated scan root and home directory
pub struct TestEnv {
    /// Directory passed as `--venv-dir`
    pub root: TempDir,
    /// Directory used as HOME (default roots, config file)
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create root temp dir"),
            home: TempDir::new().expect("Failed to create home temp dir"),
        }
    }

    /// Path relative to the scan root
    pub fn root_path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Path relative to the home directory
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    /// Write `~/.config/uv-tidy/config.toml`
    pub fn write_user_config(&self, content: &str) -> PathBuf {
        let path = self.home_path(".config/uv-tidy/config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Run against the scan root (`--venv-dir <root>` is prepended)
    pub fn run(&self, args: &[&str]) -> TestResult {
        let root = self.root.path().to_string_lossy().to_string();
        let mut full = vec!["--venv-dir", root.as_str()];
        full.extend_from_slice(args);
        self.run_raw(&full, &[])
    }

    /// Run with exactly `args` and extra env vars
    pub fn run_raw(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(bin());
        cmd.current_dir(self.home.path())
            .args(args)
            .stdin(Stdio::null())
            .env("UV_TIDY_TEST_HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");

        for key in [
            "UV_TIDY_MIN_AGE_DAYS",
            "UV_TIDY_MIN_SIZE_MB",
            "UV_TIDY_SORT_BY",
            "UV_TIDY_LIMIT",
            "UV_TIDY_EXCLUDE",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("Failed to execute uv-tidy"))
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Path of the built binary
pub fn bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_uv-tidy"))
}
