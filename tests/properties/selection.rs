//! Property tests for the selection pipeline and the dry-run gate.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use uv_tidy::application::ExecutionGate;
use uv_tidy::domain::entities::{Disposition, ExecutionOutcome, VenvDescriptor};
use uv_tidy::domain::policies::{RuleConfig, RuleSet};
use uv_tidy::domain::ports::{EntryKind, FileSystem, FsResult};
use uv_tidy::domain::services::{evaluate, select, SelectionFilters};
use uv_tidy::domain::value_objects::{ExecutionMode, SortKey};

/// File system that fails the test on any call
struct UntouchableFs;

impl FileSystem for UntouchableFs {
    fn entry_kind(&self, path: &Path) -> FsResult<EntryKind> {
        panic!("dry run called entry_kind({})", path.display())
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        panic!("dry run called remove_dir_all({})", path.display())
    }
}

fn dispositions() -> impl Strategy<Value = Vec<Disposition>> {
    proptest::collection::vec((0u64..2000, 0u64..2000, 0u64..5_000_000), 0..40).prop_map(
        |metrics| {
            let rules = RuleSet::standard();
            let config = RuleConfig::default();
            metrics
                .into_iter()
                .enumerate()
                .map(|(i, (age, access, size))| {
                    let d = VenvDescriptor::new(format!("/srv/venvs/v{:03}", i))
                        .with_age_days(age)
                        .with_last_access_days(access)
                        .with_size_kb(size);
                    evaluate(&d, &rules, &config).unwrap()
                })
                .collect()
        },
    )
}

fn paths(items: &[Disposition]) -> BTreeSet<PathBuf> {
    items.iter().map(|d| d.descriptor().path.clone()).collect()
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![Just(SortKey::Age), Just(SortKey::Size), Just(SortKey::Name)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: without a limit the sort key never changes membership.
    #[test]
    fn property_sort_key_preserves_membership(all in dispositions()) {
        let filters = SelectionFilters::default();
        let by_age = select(&all, &filters, SortKey::Age, None);
        let by_size = select(&all, &filters, SortKey::Size, None);
        let by_name = select(&all, &filters, SortKey::Name, None);

        prop_assert_eq!(paths(by_age.selected()), paths(by_size.selected()));
        prop_assert_eq!(paths(by_age.selected()), paths(by_name.selected()));
    }

    /// PROPERTY: `limit = N` keeps exactly the first N of the full ordering.
    #[test]
    fn property_limit_keeps_the_best_n(
        all in dispositions(),
        sort in sort_key(),
        limit in 1usize..10,
    ) {
        let filters = SelectionFilters::default();
        let full = select(&all, &filters, sort, None);
        let limited = select(&all, &filters, sort, Some(limit));

        let expected = limit.min(full.len());
        prop_assert_eq!(limited.len(), expected);
        prop_assert_eq!(limited.selected(), &full.selected()[..expected]);
        prop_assert_eq!(limited.dropped().len(), full.len() - expected);
    }

    /// PROPERTY: `limit = 0` and no limit are the same.
    #[test]
    fn property_limit_zero_is_unbounded(all in dispositions(), sort in sort_key()) {
        let filters = SelectionFilters::default();
        prop_assert_eq!(
            select(&all, &filters, sort, Some(0)),
            select(&all, &filters, sort, None)
        );
    }

    /// PROPERTY: every REMOVE disposition is either selected or dropped.
    #[test]
    fn property_candidates_are_partitioned(
        all in dispositions(),
        min_age in proptest::option::of(0u64..1000),
        limit in proptest::option::of(0usize..10),
    ) {
        let filters = SelectionFilters { min_age_days: min_age, ..SelectionFilters::default() };
        let result = select(&all, &filters, SortKey::Age, limit);

        let removable = all.iter().filter(|d| d.is_remove()).count();
        prop_assert_eq!(result.len() + result.dropped().len(), removable);
        prop_assert!(result.selected().iter().all(|d| d.is_remove()));
    }

    /// PROPERTY: a dry run never touches the file system and reports
    /// exactly the selection.
    #[test]
    fn property_dry_run_is_inert(all in dispositions(), sort in sort_key()) {
        let selection = select(&all, &SelectionFilters::default(), sort, None);
        let report = ExecutionGate::new(UntouchableFs)
            .with_jobs(4)
            .execute(&selection, ExecutionMode::DryRun);

        prop_assert_eq!(report.entries.len(), selection.len());
        for (entry, d) in report.entries.iter().zip(selection.selected()) {
            prop_assert_eq!(&entry.path, &d.descriptor().path);
            prop_assert_eq!(&entry.outcome, &ExecutionOutcome::WouldRemove);
        }
    }
}
