use crate::features::domain::feature_set::FeatureSet;
use crate::shared::classification::{ClassificationResult, Label};

pub type Predicate = fn(&FeatureSet) -> bool;

/// One row of a decision table: if `predicate` holds, emit `label`.
#[derive(Clone, Copy)]
pub struct Rule<L> {
    pub label: L,
    pub confidence: f64,
    pub predicate: Predicate,
}

impl<L: Label> Rule<L> {
    pub const fn new(label: L, confidence: f64, predicate: Predicate) -> Self {
        Self {
            label,
            confidence,
            predicate,
        }
    }
}

/// Ordered list of rules evaluated top to bottom; the first match wins and
/// `fallback` applies when nothing matches.
pub struct DecisionTable<L: 'static> {
    rules: &'static [Rule<L>],
    fallback: ClassificationResult<L>,
}

impl<L: Label> DecisionTable<L> {
    pub const fn new(rules: &'static [Rule<L>], fallback: ClassificationResult<L>) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &'static [Rule<L>] {
        self.rules
    }

    pub fn evaluate(&self, features: &FeatureSet) -> ClassificationResult<L> {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(features))
            .map(|rule| ClassificationResult::new(rule.label, rule.confidence))
            .unwrap_or(self.fallback)
    }
}
