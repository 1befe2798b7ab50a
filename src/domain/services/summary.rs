//! Totals over a set of dispositions

use serde::Serialize;

use crate::domain::entities::Disposition;

/// Aggregate view of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub found: usize,
    pub to_remove: usize,
    pub to_keep: usize,
    pub corrupted: usize,
    /// Paths that failed to scan or evaluate
    pub errors: usize,
    /// Known size of every REMOVE disposition, in KiB
    pub reclaimable_kb: u64,
    pub oldest_candidate_days: Option<u64>,
    pub newest_candidate_days: Option<u64>,
}

impl ScanSummary {
    pub fn from_dispositions(dispositions: &[Disposition], errors: usize) -> Self {
        let mut summary = ScanSummary {
            found: dispositions.len(),
            errors,
            ..Default::default()
        };

        for disposition in dispositions {
            let descriptor = disposition.descriptor();
            if descriptor.is_corrupted() {
                summary.corrupted += 1;
            }
            if !disposition.is_remove() {
                summary.to_keep += 1;
                continue;
            }

            summary.to_remove += 1;
            summary.reclaimable_kb += descriptor.size_kb.unwrap_or(0);
            if let Some(age) = descriptor.age_days {
                summary.oldest_candidate_days =
                    Some(summary.oldest_candidate_days.map_or(age, |o| o.max(age)));
                summary.newest_candidate_days =
                    Some(summary.newest_candidate_days.map_or(age, |n| n.min(age)));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CorruptionType, VenvDescriptor};
    use crate::domain::value_objects::{Confidence, Verdict};

    fn disposition(d: VenvDescriptor, verdict: Verdict) -> Disposition {
        Disposition::new(d, verdict, Vec::new(), 0, Confidence::High)
    }

    #[test]
    fn counts_and_totals() {
        let dispositions = vec![
            disposition(
                VenvDescriptor::new("/a").with_age_days(40).with_size_kb(100),
                Verdict::Remove,
            ),
            disposition(
                VenvDescriptor::new("/b").with_age_days(400).with_size_kb(50),
                Verdict::Remove,
            ),
            disposition(
                VenvDescriptor::new("/c").with_age_days(2).with_size_kb(999),
                Verdict::Keep,
            ),
            disposition(
                VenvDescriptor::new("/d").with_corruption(CorruptionType::Unreadable),
                Verdict::Remove,
            ),
        ];

        let summary = ScanSummary::from_dispositions(&dispositions, 2);

        assert_eq!(summary.found, 4);
        assert_eq!(summary.to_remove, 3);
        assert_eq!(summary.to_keep, 1);
        assert_eq!(summary.corrupted, 1);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.reclaimable_kb, 150);
        assert_eq!(summary.oldest_candidate_days, Some(400));
        assert_eq!(summary.newest_candidate_days, Some(40));
    }

    #[test]
    fn empty_input() {
        let summary = ScanSummary::from_dispositions(&[], 0);
        assert_eq!(summary, ScanSummary::default());
    }
}
