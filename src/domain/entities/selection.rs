//! Selection result: the only set the execution gate may act on

use std::fmt;

use serde::Serialize;

use super::disposition::Disposition;

/// Why a removal candidate did not make it into the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    BelowMinAge,
    BelowMinSize,
    Excluded,
    OverLimit,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::BelowMinAge => "below_min_age",
            DropReason::BelowMinSize => "below_min_size",
            DropReason::Excluded => "excluded",
            DropReason::OverLimit => "over_limit",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedCandidate {
    pub disposition: Disposition,
    pub reason: DropReason,
}

/// Ordered removal candidates after filter, sort and limit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    selected: Vec<Disposition>,
    dropped: Vec<DroppedCandidate>,
}

impl SelectionResult {
    pub(crate) fn new(selected: Vec<Disposition>, dropped: Vec<DroppedCandidate>) -> Self {
        Self { selected, dropped }
    }

    pub fn selected(&self) -> &[Disposition] {
        &self.selected
    }

    pub fn dropped(&self) -> &[DroppedCandidate] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sum of known sizes of the selected venvs, in KiB
    pub fn total_size_kb(&self) -> u64 {
        self.selected
            .iter()
            .filter_map(|d| d.descriptor().size_kb)
            .sum()
    }
}
