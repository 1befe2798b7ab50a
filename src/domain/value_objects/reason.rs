//! Reason codes attached to dispositions

use std::fmt;

use serde::Serialize;

/// Stable, machine-readable reason code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Path matched an exclude pattern
    Excluded,
    /// Touched inside the recency window
    RecentlyUsed,
    /// Venv is corrupted
    Corruption,
    /// Age at or above the minimum
    AgeThreshold,
    /// Size at or above the minimum
    SizeThreshold,
    /// Removal candidate with a large footprint
    LargeFootprint,
    /// Younger than the minimum age
    BelowAgeThreshold,
    /// Smaller than the minimum size
    BelowSizeThreshold,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::Excluded => "excluded",
            ReasonCode::RecentlyUsed => "recently_used",
            ReasonCode::Corruption => "corruption",
            ReasonCode::AgeThreshold => "age_threshold",
            ReasonCode::SizeThreshold => "size_threshold",
            ReasonCode::LargeFootprint => "large_footprint",
            ReasonCode::BelowAgeThreshold => "below_age_threshold",
            ReasonCode::BelowSizeThreshold => "below_size_threshold",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reason code plus its rendered, human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub code: ReasonCode,
    pub message: String,
}

impl Reason {
    pub fn new(code: ReasonCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
