//! Common test utilities for uv-tidy CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated scan root and home directory, plus a CLI runner
//! - Fixtures: on-disk venvs with controlled timestamps

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
