//! Rule policy
//!
//! The built-in rules and the configuration they read. Each rule is a pure
//! predicate over a [`VenvDescriptor`]; the engine walks them in priority
//! order.

use crate::domain::entities::VenvDescriptor;
use crate::domain::value_objects::{
    format_size_kb, ExcludePatterns, Reason, ReasonCode, Verdict, LARGE_FOOTPRINT_KB,
};

/// Default minimum age for removal
pub const DEFAULT_MIN_AGE_DAYS: u64 = 30;

/// Default protected recency window
pub const DEFAULT_RECENCY_DAYS: u64 = 7;

/// Thresholds and patterns the rules are evaluated against
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Inclusive: `age_days >= min_age_days` passes
    pub min_age_days: u64,
    /// Inclusive; `None` disables the size gate
    pub min_size_kb: Option<u64>,
    /// Activity inside this many days protects the venv; 0 disables
    pub recency_days: u64,
    pub exclude: ExcludePatterns,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_age_days: DEFAULT_MIN_AGE_DAYS,
            min_size_kb: None,
            recency_days: DEFAULT_RECENCY_DAYS,
            exclude: ExcludePatterns::empty(),
        }
    }
}

impl RuleConfig {
    pub fn with_min_age_days(mut self, days: u64) -> Self {
        self.min_age_days = days;
        self
    }

    pub fn with_min_size_kb(mut self, kb: Option<u64>) -> Self {
        self.min_size_kb = kb;
        self
    }

    pub fn with_recency_days(mut self, days: u64) -> Self {
        self.recency_days = days;
        self
    }

    pub fn with_exclude(mut self, exclude: ExcludePatterns) -> Self {
        self.exclude = exclude;
        self
    }
}

/// Built-in rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    ExcludePattern,
    Recency,
    Corruption,
    AgeThreshold,
    SizeThreshold,
    LargeFootprint,
}

/// How a matching rule affects the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRole {
    /// Decides the verdict immediately
    Override(Verdict),
    /// Must match (when enabled) for a REMOVE verdict
    Gate,
    /// Only adds a reason and weight to REMOVE candidates
    Informational,
}

/// Result of checking one rule against one descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Matched(Reason),
    /// A gate that did not pass, with the reason it held the venv back
    Failed(Reason),
    /// Rule disabled or not relevant for this descriptor
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    /// Lower runs first
    pub priority: u8,
    pub weight: u32,
    pub role: RuleRole,
}

impl Rule {
    pub fn is_terminal(&self) -> bool {
        matches!(self.role, RuleRole::Override(_))
    }

    pub fn check(&self, descriptor: &VenvDescriptor, config: &RuleConfig) -> RuleOutcome {
        match self.kind {
            RuleKind::ExcludePattern => match config.exclude.matching(descriptor.path()) {
                Some(pattern) => RuleOutcome::Matched(Reason::new(
                    ReasonCode::Excluded,
                    format!("matches exclude pattern '{}'", pattern),
                )),
                None => RuleOutcome::NotApplicable,
            },
            RuleKind::Recency => {
                if config.recency_days == 0 {
                    return RuleOutcome::NotApplicable;
                }
                match descriptor.days_since_activity() {
                    Some(days) if days < config.recency_days => RuleOutcome::Matched(Reason::new(
                        ReasonCode::RecentlyUsed,
                        format!(
                            "used {} days ago (within {}-day recency window)",
                            days, config.recency_days
                        ),
                    )),
                    _ => RuleOutcome::NotApplicable,
                }
            }
            RuleKind::Corruption => match descriptor.corruption {
                Some(kind) => RuleOutcome::Matched(Reason::new(
                    ReasonCode::Corruption,
                    format!("corrupted: {}", kind),
                )),
                None => RuleOutcome::NotApplicable,
            },
            RuleKind::AgeThreshold => match descriptor.age_days {
                Some(age) if age >= config.min_age_days => RuleOutcome::Matched(Reason::new(
                    ReasonCode::AgeThreshold,
                    format!("unused for {} days (>= {})", age, config.min_age_days),
                )),
                Some(age) => RuleOutcome::Failed(Reason::new(
                    ReasonCode::BelowAgeThreshold,
                    format!("unused for only {} days (< {})", age, config.min_age_days),
                )),
                None => RuleOutcome::NotApplicable,
            },
            RuleKind::SizeThreshold => match (config.min_size_kb, descriptor.size_kb) {
                (Some(min), Some(size)) if size >= min => RuleOutcome::Matched(Reason::new(
                    ReasonCode::SizeThreshold,
                    format!("{} (>= {})", format_size_kb(size), format_size_kb(min)),
                )),
                (Some(min), Some(size)) => RuleOutcome::Failed(Reason::new(
                    ReasonCode::BelowSizeThreshold,
                    format!("only {} (< {})", format_size_kb(size), format_size_kb(min)),
                )),
                _ => RuleOutcome::NotApplicable,
            },
            RuleKind::LargeFootprint => match descriptor.size_kb {
                Some(size) if size > LARGE_FOOTPRINT_KB => RuleOutcome::Matched(Reason::new(
                    ReasonCode::LargeFootprint,
                    format!("large footprint: {}", format_size_kb(size)),
                )),
                _ => RuleOutcome::NotApplicable,
            },
        }
    }
}

/// Ordered list of rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Build a rule set; rules are ordered by ascending priority.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    /// The built-in rules.
    ///
    /// Exclusion beats recency, recency beats corruption, and corruption
    /// beats the age and size gates.
    pub fn standard() -> Self {
        Self::new(vec![
            Rule {
                kind: RuleKind::ExcludePattern,
                priority: 0,
                weight: 0,
                role: RuleRole::Override(Verdict::Keep),
            },
            Rule {
                kind: RuleKind::Recency,
                priority: 10,
                weight: 0,
                role: RuleRole::Override(Verdict::Keep),
            },
            Rule {
                kind: RuleKind::Corruption,
                priority: 20,
                weight: 50,
                role: RuleRole::Override(Verdict::Remove),
            },
            Rule {
                kind: RuleKind::AgeThreshold,
                priority: 30,
                weight: 30,
                role: RuleRole::Gate,
            },
            Rule {
                kind: RuleKind::SizeThreshold,
                priority: 40,
                weight: 20,
                role: RuleRole::Gate,
            },
            Rule {
                kind: RuleKind::LargeFootprint,
                priority: 50,
                weight: 10,
                role: RuleRole::Informational,
            },
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, kind: RuleKind) -> Option<&Rule> {
        self.rules.iter().find(|r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rules_are_in_precedence_order() {
        let kinds: Vec<_> = RuleSet::standard().rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::ExcludePattern,
                RuleKind::Recency,
                RuleKind::Corruption,
                RuleKind::AgeThreshold,
                RuleKind::SizeThreshold,
                RuleKind::LargeFootprint,
            ]
        );
    }

    #[test]
    fn new_sorts_by_priority() {
        let set = RuleSet::new(vec![
            Rule {
                kind: RuleKind::AgeThreshold,
                priority: 5,
                weight: 1,
                role: RuleRole::Gate,
            },
            Rule {
                kind: RuleKind::ExcludePattern,
                priority: 1,
                weight: 0,
                role: RuleRole::Override(Verdict::Keep),
            },
        ]);
        assert_eq!(set.rules()[0].kind, RuleKind::ExcludePattern);
        assert!(set.rules()[0].is_terminal());
    }

    #[test]
    fn age_threshold_is_inclusive() {
        let rule = RuleSet::standard().get(RuleKind::AgeThreshold).cloned().unwrap();
        let config = RuleConfig::default();
        let at = VenvDescriptor::new("/v").with_age_days(30);
        let below = VenvDescriptor::new("/v").with_age_days(29);
        assert!(matches!(rule.check(&at, &config), RuleOutcome::Matched(_)));
        assert!(matches!(rule.check(&below, &config), RuleOutcome::Failed(_)));
    }

    #[test]
    fn size_gate_disabled_without_minimum() {
        let rule = RuleSet::standard().get(RuleKind::SizeThreshold).cloned().unwrap();
        let d = VenvDescriptor::new("/v").with_size_kb(1);
        assert_eq!(rule.check(&d, &RuleConfig::default()), RuleOutcome::NotApplicable);

        let config = RuleConfig::default().with_min_size_kb(Some(1));
        assert!(matches!(rule.check(&d, &config), RuleOutcome::Matched(_)));
    }

    #[test]
    fn recency_window_zero_disables_override() {
        let rule = RuleSet::standard().get(RuleKind::Recency).cloned().unwrap();
        let d = VenvDescriptor::new("/v").with_age_days(0);
        let config = RuleConfig::default().with_recency_days(0);
        assert_eq!(rule.check(&d, &config), RuleOutcome::NotApplicable);
    }

    #[test]
    fn recency_uses_last_access() {
        let rule = RuleSet::standard().get(RuleKind::Recency).cloned().unwrap();
        let d = VenvDescriptor::new("/v")
            .with_age_days(400)
            .with_last_access_days(1);
        match rule.check(&d, &RuleConfig::default()) {
            RuleOutcome::Matched(reason) => assert_eq!(reason.code, ReasonCode::RecentlyUsed),
            other => panic!("expected match, got {:?}", other),
        }
    }
}
