//! Rule engine
//!
//! Turns a descriptor into a [`Disposition`]. Rules are walked in priority
//! order: the first matching override decides, gates accumulate, and
//! informational rules only decorate removal candidates.

use crate::domain::entities::{AgeSource, Disposition, VenvDescriptor};
use crate::domain::policies::{RuleConfig, RuleOutcome, RuleRole, RuleSet};
use crate::domain::value_objects::{Confidence, ReasonCode, Verdict};
use crate::error::EvaluationError;

/// Evaluate one descriptor.
///
/// A healthy descriptor without `age_days` or `size_kb` cannot be judged and
/// fails with [`EvaluationError::MissingField`].
pub fn evaluate(
    descriptor: &VenvDescriptor,
    rules: &RuleSet,
    config: &RuleConfig,
) -> Result<Disposition, EvaluationError> {
    validate(descriptor)?;

    let confidence = match descriptor.age_source {
        AgeSource::Markers => Confidence::High,
        AgeSource::Directory => Confidence::Low,
    };

    let mut reasons = Vec::new();
    let mut informational = Vec::new();
    let mut score = 0u32;
    let mut gates_passed = true;

    for rule in rules.rules() {
        match rule.check(descriptor, config) {
            RuleOutcome::Matched(reason) => match rule.role {
                RuleRole::Override(verdict) => {
                    reasons.push(reason);
                    score += rule.weight;
                    return Ok(Disposition::new(
                        descriptor.clone(),
                        verdict,
                        reasons,
                        score,
                        confidence,
                    ));
                }
                RuleRole::Gate => {
                    reasons.push(reason);
                    score += rule.weight;
                }
                RuleRole::Informational => informational.push((reason, rule.weight)),
            },
            RuleOutcome::Failed(reason) => {
                gates_passed = false;
                reasons.push(reason);
            }
            RuleOutcome::NotApplicable => {}
        }
    }

    let verdict = if gates_passed {
        for (reason, weight) in informational {
            reasons.push(reason);
            score += weight;
        }
        Verdict::Remove
    } else {
        // Keep only the reasons that held the venv back
        reasons.retain(|r| {
            matches!(
                r.code,
                ReasonCode::BelowAgeThreshold | ReasonCode::BelowSizeThreshold
            )
        });
        score = 0;
        Verdict::Keep
    };

    Ok(Disposition::new(
        descriptor.clone(),
        verdict,
        reasons,
        score,
        confidence,
    ))
}

/// Evaluate a batch. Malformed descriptors are logged and returned separately.
pub fn evaluate_all<'a, I>(
    descriptors: I,
    rules: &RuleSet,
    config: &RuleConfig,
) -> (Vec<Disposition>, Vec<EvaluationError>)
where
    I: IntoIterator<Item = &'a VenvDescriptor>,
{
    let mut dispositions = Vec::new();
    let mut errors = Vec::new();

    for descriptor in descriptors {
        match evaluate(descriptor, rules, config) {
            Ok(disposition) => {
                tracing::debug!(
                    path = %descriptor.path.display(),
                    verdict = %disposition.verdict(),
                    score = disposition.score(),
                    "evaluated"
                );
                dispositions.push(disposition);
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping venv");
                errors.push(err);
            }
        }
    }

    (dispositions, errors)
}

fn validate(descriptor: &VenvDescriptor) -> Result<(), EvaluationError> {
    if descriptor.is_corrupted() {
        return Ok(());
    }
    if descriptor.age_days.is_none() {
        return Err(EvaluationError::MissingField {
            path: descriptor.path.clone(),
            field: "age_days",
        });
    }
    if descriptor.size_kb.is_none() {
        return Err(EvaluationError::MissingField {
            path: descriptor.path.clone(),
            field: "size_kb",
        });
    }
    Ok(())
}
