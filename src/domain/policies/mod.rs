//! Domain Policies
//!
//! Business rules that govern evaluation. Pure functions over domain
//! entities.

mod rules;

pub use rules::{
    Rule, RuleConfig, RuleKind, RuleOutcome, RuleRole, RuleSet, DEFAULT_MIN_AGE_DAYS,
    DEFAULT_RECENCY_DAYS,
};
