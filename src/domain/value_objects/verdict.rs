//! Verdict and confidence of a disposition

use std::fmt;

use serde::Serialize;

/// Keep the venv, or mark it as a removal candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Keep,
    Remove,
}

impl Verdict {
    pub fn is_remove(&self) -> bool {
        matches!(self, Verdict::Remove)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Keep => write!(f, "keep"),
            Verdict::Remove => write!(f, "remove"),
        }
    }
}

/// How much the age signal can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Age derived from activity markers
    High,
    /// Age fell back to the directory timestamp
    Low,
}
