//! Sort key value object - ordering of removal candidates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ordering applied by the selection pipeline
///
/// - `Age`: oldest first
/// - `Size`: largest first
/// - `Name`: directory name, ascending
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Age,
    Size,
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Age => "age",
            SortKey::Size => "size",
            SortKey::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "age" => Ok(SortKey::Age),
            "size" => Ok(SortKey::Size),
            "name" => Ok(SortKey::Name),
            other => Err(ConfigError::UnknownSortKey(other.to_string())),
        }
    }
}
