//! Selection pipeline
//!
//! Filters removal candidates, orders them and applies the limit. Pure and
//! deterministic: identical input yields identical output.

use std::cmp::Ordering;

use crate::domain::entities::{Disposition, DropReason, DroppedCandidate, SelectionResult};
use crate::domain::value_objects::{ExcludePatterns, SortKey};

/// User constraints applied on top of the rule verdicts
#[derive(Debug, Clone, Default)]
pub struct SelectionFilters {
    pub min_age_days: Option<u64>,
    pub min_size_kb: Option<u64>,
    /// Re-applied here even though the rule engine already honours it
    pub exclude: ExcludePatterns,
}

/// Select REMOVE dispositions.
///
/// `limit` of `None` or `Some(0)` keeps every candidate. Unknown metrics
/// never fail a filter.
pub fn select(
    dispositions: &[Disposition],
    filters: &SelectionFilters,
    sort: SortKey,
    limit: Option<usize>,
) -> SelectionResult {
    let mut selected = Vec::new();
    let mut dropped = Vec::new();

    for disposition in dispositions.iter().filter(|d| d.is_remove()) {
        match drop_reason(disposition, filters) {
            Some(reason) => dropped.push(DroppedCandidate {
                disposition: disposition.clone(),
                reason,
            }),
            None => selected.push(disposition.clone()),
        }
    }

    selected.sort_by(|a, b| compare(a, b, sort));

    if let Some(limit) = limit.filter(|n| *n > 0) {
        if selected.len() > limit {
            for disposition in selected.split_off(limit) {
                dropped.push(DroppedCandidate {
                    disposition,
                    reason: DropReason::OverLimit,
                });
            }
        }
    }

    SelectionResult::new(selected, dropped)
}

fn drop_reason(disposition: &Disposition, filters: &SelectionFilters) -> Option<DropReason> {
    let descriptor = disposition.descriptor();

    if filters.exclude.is_excluded(descriptor.path()) {
        return Some(DropReason::Excluded);
    }
    if let (Some(min), Some(age)) = (filters.min_age_days, descriptor.age_days) {
        if age < min {
            return Some(DropReason::BelowMinAge);
        }
    }
    if let (Some(min), Some(size)) = (filters.min_size_kb, descriptor.size_kb) {
        if size < min {
            return Some(DropReason::BelowMinSize);
        }
    }
    None
}

fn compare(a: &Disposition, b: &Disposition, sort: SortKey) -> Ordering {
    let (da, db) = (a.descriptor(), b.descriptor());
    let primary = match sort {
        // Descending; unknown values sort last
        SortKey::Age => db.age_days.cmp(&da.age_days),
        SortKey::Size => db.size_kb.cmp(&da.size_kb),
        SortKey::Name => da.name().cmp(&db.name()),
    };
    primary.then_with(|| da.path.cmp(&db.path))
}
