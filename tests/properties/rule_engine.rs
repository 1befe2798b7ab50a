//! Property tests for the rule engine.

use proptest::prelude::*;

use uv_tidy::domain::entities::{CorruptionType, VenvDescriptor};
use uv_tidy::domain::policies::{RuleConfig, RuleSet};
use uv_tidy::domain::services::evaluate;
use uv_tidy::domain::value_objects::{ExcludePatterns, ReasonCode, Verdict};

fn corruption() -> impl Strategy<Value = Option<CorruptionType>> {
    prop_oneof![
        Just(None),
        Just(Some(CorruptionType::MissingPython)),
        Just(Some(CorruptionType::MissingActivate)),
        Just(Some(CorruptionType::Unreadable)),
        Just(Some(CorruptionType::IncompleteLayout)),
    ]
}

fn descriptor(
    name: &str,
    age: u64,
    access: u64,
    size: u64,
    corrupt: Option<CorruptionType>,
) -> VenvDescriptor {
    let d = VenvDescriptor::new(format!("/srv/venvs/{}", name))
        .with_age_days(age)
        .with_last_access_days(access)
        .with_size_kb(size);
    match corrupt {
        Some(c) => d.with_corruption(c),
        None => d,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: activity inside the recency window always keeps the venv.
    #[test]
    fn property_recent_use_always_keeps(
        age in 0u64..2000,
        access in 0u64..7,
        size in 0u64..10_000_000,
        min_size in proptest::option::of(0u64..1_000_000),
        corrupt in corruption(),
    ) {
        let config = RuleConfig::default().with_min_size_kb(min_size);
        let d = descriptor("proj", age, access, size, corrupt);

        let disposition = evaluate(&d, &RuleSet::standard(), &config).unwrap();

        prop_assert_eq!(disposition.verdict(), Verdict::Keep);
    }

    /// PROPERTY: an exclude match always keeps, whatever the metrics.
    #[test]
    fn property_excluded_always_keeps(
        age in 0u64..2000,
        access in 0u64..2000,
        size in 0u64..10_000_000,
        corrupt in corruption(),
    ) {
        let config = RuleConfig::default()
            .with_exclude(ExcludePatterns::new(["*test*"]).unwrap());
        let d = descriptor("test-environment", age, access, size, corrupt);

        let disposition = evaluate(&d, &RuleSet::standard(), &config).unwrap();

        prop_assert_eq!(disposition.verdict(), Verdict::Keep);
        prop_assert!(disposition.has_reason(ReasonCode::Excluded));
    }

    /// PROPERTY: a stale healthy venv past the age threshold is removed.
    #[test]
    fn property_stale_healthy_venv_is_removed(
        min_age in 7u64..365,
        extra in 0u64..1000,
        size in 0u64..10_000_000,
    ) {
        let config = RuleConfig::default().with_min_age_days(min_age);
        let age = min_age + extra;
        let d = descriptor("proj", age, age, size, None);

        let disposition = evaluate(&d, &RuleSet::standard(), &config).unwrap();

        prop_assert_eq!(disposition.verdict(), Verdict::Remove);
        prop_assert!(disposition.has_reason(ReasonCode::AgeThreshold));
    }

    /// PROPERTY: KEEP never scores; REMOVE always carries a reason.
    #[test]
    fn property_verdict_and_score_agree(
        age in 0u64..2000,
        access in 0u64..2000,
        size in 0u64..10_000_000,
        min_size in proptest::option::of(0u64..1_000_000),
        corrupt in corruption(),
    ) {
        let config = RuleConfig::default().with_min_size_kb(min_size);
        let d = descriptor("proj", age, access, size, corrupt);

        let disposition = evaluate(&d, &RuleSet::standard(), &config).unwrap();

        match disposition.verdict() {
            Verdict::Keep => prop_assert_eq!(disposition.score(), 0),
            Verdict::Remove => prop_assert!(!disposition.reasons().is_empty()),
        }
    }

    /// PROPERTY: evaluation is a pure function of its inputs.
    #[test]
    fn property_evaluation_is_deterministic(
        age in 0u64..2000,
        access in 0u64..2000,
        size in 0u64..10_000_000,
        corrupt in corruption(),
    ) {
        let config = RuleConfig::default();
        let d = descriptor("proj", age, access, size, corrupt);
        let rules = RuleSet::standard();

        prop_assert_eq!(
            evaluate(&d, &rules, &config).unwrap(),
            evaluate(&d, &rules, &config).unwrap()
        );
    }
}
