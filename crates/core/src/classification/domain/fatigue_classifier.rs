use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::decision_table::{DecisionTable, Rule};
use crate::features::domain::feature_set::{Feature, FeatureSet};
use crate::shared::classification::{ClassificationResult, Fatigue};

/// Two alert bands, then tired, then very tired. The very-tired band is a
/// subset of the tired band and therefore never wins; it is kept so the
/// table matches the established classifier output.
static FATIGUE_RULES: [Rule<Fatigue>; 4] = [
    Rule::new(Fatigue::Alert, 0.9, |f| {
        f.eye_openness > 0.15 && f.eyebrow_position < 0.35 && f.eyelid_droop < 0.02
    }),
    Rule::new(Fatigue::Alert, 0.8, |f| {
        f.eye_openness > 0.1 && f.eyebrow_position < 0.4 && f.eyelid_droop < 0.03
    }),
    Rule::new(Fatigue::Tired, 0.8, |f| {
        f.eye_openness < 0.08 || f.eyebrow_position > 0.45 || f.eyelid_droop > 0.04
    }),
    Rule::new(Fatigue::VeryTired, 0.9, |f| {
        f.eye_openness < 0.05 || f.eyebrow_position > 0.5 || f.eyelid_droop > 0.06
    }),
];

static FATIGUE_TABLE: DecisionTable<Fatigue> = DecisionTable::new(
    &FATIGUE_RULES,
    ClassificationResult {
        label: Fatigue::Moderate,
        confidence: 0.6,
    },
);

const FATIGUE_INPUTS: [Feature; 3] = [
    Feature::EyeOpenness,
    Feature::EyebrowPosition,
    Feature::EyelidDroop,
];

pub struct FatigueClassifier;

impl FatigueClassifier {
    pub fn table() -> &'static DecisionTable<Fatigue> {
        &FATIGUE_TABLE
    }
}

impl Classifier for FatigueClassifier {
    type Label = Fatigue;

    fn inputs(&self) -> &'static [Feature] {
        &FATIGUE_INPUTS
    }

    fn classify(&self, features: &FeatureSet) -> ClassificationResult<Fatigue> {
        FATIGUE_TABLE.evaluate(features)
    }
}
