//! Disposition entity: the per-venv verdict with its justification

use serde::Serialize;

use super::descriptor::VenvDescriptor;
use crate::domain::value_objects::{Confidence, Reason, ReasonCode, Verdict};

/// Result of evaluating one descriptor.
///
/// Built once by the rule engine and never mutated; a re-scan produces a
/// fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disposition {
    descriptor: VenvDescriptor,
    verdict: Verdict,
    reasons: Vec<Reason>,
    score: u32,
    confidence: Confidence,
}

impl Disposition {
    pub fn new(
        descriptor: VenvDescriptor,
        verdict: Verdict,
        reasons: Vec<Reason>,
        score: u32,
        confidence: Confidence,
    ) -> Self {
        Self {
            descriptor,
            verdict,
            reasons,
            score,
            confidence,
        }
    }

    pub fn descriptor(&self) -> &VenvDescriptor {
        &self.descriptor
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_remove(&self) -> bool {
        self.verdict.is_remove()
    }

    /// Matched rules in evaluation order
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    pub fn reason_codes(&self) -> impl Iterator<Item = ReasonCode> + '_ {
        self.reasons.iter().map(|r| r.code)
    }

    pub fn has_reason(&self, code: ReasonCode) -> bool {
        self.reasons.iter().any(|r| r.code == code)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}
