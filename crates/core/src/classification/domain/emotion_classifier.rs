//! Additive emotion scoring over facial ratios.
//!
//! Each satisfied predicate adds one point to its emotion. The highest score
//! wins; ties go to the emotion declared first in [`Emotion::ALL`].

use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::decision_table::Predicate;
use crate::features::domain::feature_set::{Feature, FeatureSet};
use crate::shared::classification::{ClassificationResult, Emotion};

/// One scoring predicate worth a single point.
pub struct ScoreRule {
    pub emotion: Emotion,
    pub predicate: Predicate,
}

const fn score(emotion: Emotion, predicate: Predicate) -> ScoreRule {
    ScoreRule { emotion, predicate }
}

pub static SCORE_RULES: [ScoreRule; 21] = [
    // Raised mouth corners, slight squint.
    score(Emotion::Happy, |f| f.mouth_corner_lift > 0.005),
    score(Emotion::Happy, |f| f.mouth_corner_lift > 0.01),
    score(Emotion::Happy, |f| f.eye_openness < 0.15),
    // Drooping corners, lowered brows.
    score(Emotion::Sad, |f| f.mouth_corner_lift < -0.005),
    score(Emotion::Sad, |f| f.mouth_corner_lift < -0.01),
    score(Emotion::Sad, |f| f.eyebrow_position > 0.35),
    score(Emotion::Surprised, |f| f.eye_openness > 0.2),
    score(Emotion::Surprised, |f| f.eye_openness > 0.25),
    score(Emotion::Surprised, |f| f.mouth_openness > 0.25),
    score(Emotion::Surprised, |f| f.eyebrow_position < 0.3),
    score(Emotion::Angry, |f| f.eyebrow_position > 0.4),
    score(Emotion::Angry, |f| f.mouth_openness < 0.1),
    score(Emotion::Angry, |f| f.eye_openness < 0.1),
    score(Emotion::Fearful, |f| f.eye_openness > 0.3),
    score(Emotion::Fearful, |f| f.mouth_openness > 0.3),
    score(Emotion::Fearful, |f| f.eyebrow_position < 0.25),
    score(Emotion::Disgusted, |f| f.mouth_openness < 0.15),
    score(Emotion::Disgusted, |f| f.eyebrow_position > 0.45),
    score(Emotion::Neutral, |f| f.mouth_corner_lift.abs() < 0.005),
    score(Emotion::Neutral, |f| f.eye_openness > 0.1 && f.eye_openness < 0.2),
    score(Emotion::Neutral, |f| f.mouth_openness > 0.1 && f.mouth_openness < 0.2),
];

/// Confidence when no predicate fired at all.
pub const NO_SIGNAL_CONFIDENCE: f64 = 0.7;

/// Features the scoring predicates read.
const EMOTION_INPUTS: [Feature; 4] = [
    Feature::EyeOpenness,
    Feature::MouthOpenness,
    Feature::EyebrowPosition,
    Feature::MouthCornerLift,
];

pub struct EmotionClassifier;

impl EmotionClassifier {
    /// Per-emotion scores, indexed by [`Emotion::index`].
    pub fn scores(features: &FeatureSet) -> [u32; 7] {
        let mut scores = [0u32; 7];
        for rule in SCORE_RULES.iter() {
            if (rule.predicate)(features) {
                scores[rule.emotion.index()] += 1;
            }
        }
        scores
    }
}

/// `0.6 + 0.1 * (score - 1)`, clamped to 1.0.
pub fn emotion_confidence(score: u32) -> f64 {
    let raw = 0.6 + 0.1 * (score.saturating_sub(1)) as f64;
    raw.min(1.0)
}

impl Classifier for EmotionClassifier {
    type Label = Emotion;

    fn inputs(&self) -> &'static [Feature] {
        &EMOTION_INPUTS
    }

    fn classify(&self, features: &FeatureSet) -> ClassificationResult<Emotion> {
        let scores = Self::scores(features);

        let mut best = Emotion::ALL[0];
        let mut best_score = scores[0];
        for emotion in Emotion::ALL.iter().skip(1) {
            if scores[emotion.index()] > best_score {
                best = *emotion;
                best_score = scores[emotion.index()];
            }
        }

        if best_score == 0 {
            return ClassificationResult::new(Emotion::Neutral, NO_SIGNAL_CONFIDENCE);
        }
        ClassificationResult::new(best, emotion_confidence(best_score))
    }
}
