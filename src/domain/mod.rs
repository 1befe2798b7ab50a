//! Domain Layer
//!
//! Pure evaluation logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Descriptor, Disposition, SelectionResult, ExecutionReport
//! - `value_objects/` - Immutable value types (SortKey, ExcludePatterns, Verdict)
//! - `services/` - Rule engine, selection pipeline, summary
//! - `policies/` - Built-in rules and their configuration
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
