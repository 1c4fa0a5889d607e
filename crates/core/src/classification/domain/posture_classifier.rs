use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::decision_table::{DecisionTable, Rule};
use crate::features::domain::feature_set::{Feature, FeatureSet};
use crate::shared::classification::{ClassificationResult, Posture};

/// Head-position bands from tightest to loosest. `Poor` fires on any single
/// out-of-range measurement; anything between the bands is `Fair`.
static POSTURE_RULES: [Rule<Posture>; 3] = [
    Rule::new(Posture::Excellent, 0.9, |f| {
        f.head_tilt < 0.05 && f.head_centered_offset < 0.1 && f.eye_level < 0.4
    }),
    Rule::new(Posture::Good, 0.8, |f| {
        f.head_tilt < 0.1 && f.head_centered_offset < 0.2 && f.eye_level < 0.5
    }),
    Rule::new(Posture::Poor, 0.7, |f| {
        f.head_tilt > 0.15 || f.head_centered_offset > 0.3 || f.eye_level > 0.6
    }),
];

static POSTURE_TABLE: DecisionTable<Posture> = DecisionTable::new(
    &POSTURE_RULES,
    ClassificationResult {
        label: Posture::Fair,
        confidence: 0.6,
    },
);

const POSTURE_INPUTS: [Feature; 3] = [
    Feature::HeadTilt,
    Feature::HeadCenteredOffset,
    Feature::EyeLevel,
];

pub struct PostureClassifier;

impl PostureClassifier {
    pub fn table() -> &'static DecisionTable<Posture> {
        &POSTURE_TABLE
    }
}

impl Classifier for PostureClassifier {
    type Label = Posture;

    fn inputs(&self) -> &'static [Feature] {
        &POSTURE_INPUTS
    }

    fn classify(&self, features: &FeatureSet) -> ClassificationResult<Posture> {
        POSTURE_TABLE.evaluate(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::feature_set::{FeatureError, PartialFeatures};
    use crate::features::domain::feature_extractor::extract_features;
    use crate::shared::test_faces::FaceBuilder;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn head(tilt: f64, centered: f64, level: f64) -> FeatureSet {
        FeatureSet {
            head_tilt: tilt,
            head_centered_offset: centered,
            eye_level: level,
            ..FeatureSet::default()
        }
    }

    #[test]
    fn test_upright_centered_head_is_excellent() {
        let result = PostureClassifier.classify(&head(0.02, 0.02, 0.2));
        assert_eq!(result.label, Posture::Excellent);
        assert_relative_eq!(result.confidence, 0.9);
    }

    #[rstest]
    #[case::slight_tilt(head(0.07, 0.05, 0.3), Posture::Good, 0.8)]
    #[case::off_center(head(0.02, 0.15, 0.3), Posture::Good, 0.8)]
    #[case::low_eyes(head(0.02, 0.05, 0.45), Posture::Good, 0.8)]
    #[case::strong_tilt(head(0.2, 0.0, 0.3), Posture::Poor, 0.7)]
    #[case::far_off_center(head(0.0, 0.35, 0.3), Posture::Poor, 0.7)]
    #[case::slumped(head(0.0, 0.0, 0.65), Posture::Poor, 0.7)]
    #[case::between_bands(head(0.12, 0.1, 0.3), Posture::Fair, 0.6)]
    #[case::eye_level_between(head(0.0, 0.0, 0.55), Posture::Fair, 0.6)]
    fn test_posture_bands(
        #[case] features: FeatureSet,
        #[case] expected: Posture,
        #[case] confidence: f64,
    ) {
        let result = PostureClassifier.classify(&features);
        assert_eq!(result.label, expected);
        assert_relative_eq!(result.confidence, confidence);
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        // Exactly on the excellent limits falls to the next band.
        assert_eq!(
            PostureClassifier.classify(&head(0.05, 0.0, 0.2)).label,
            Posture::Good
        );
        // Exactly on the poor limit is not poor.
        assert_eq!(
            PostureClassifier.classify(&head(0.15, 0.0, 0.2)).label,
            Posture::Fair
        );
    }

    #[test]
    fn test_never_reports_unknown_for_valid_features() {
        for tilt in [0.0, 0.04, 0.09, 0.12, 0.2, 0.5] {
            for level in [0.1, 0.45, 0.55, 0.9] {
                let label = PostureClassifier.classify(&head(tilt, 0.1, level)).label;
                assert_ne!(label, Posture::Unknown);
            }
        }
    }

    #[test]
    fn test_missing_features_report_unknown() {
        let result = PostureClassifier.classify_or_invalid(None);
        assert_eq!(result, ClassificationResult::new(Posture::Unknown, 0.5));
    }

    #[test]
    fn test_tilted_frame_is_poor() {
        let frame = FaceBuilder::default().head_tilt(0.2).build();
        let f = extract_features(&frame).unwrap();
        assert_eq!(PostureClassifier.classify(&f).label, Posture::Poor);
    }

    #[test]
    fn test_table_has_three_ordered_rules() {
        let labels: Vec<_> = PostureClassifier::table()
            .rules()
            .iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, [Posture::Excellent, Posture::Good, Posture::Poor]);
    }

    #[test]
    fn test_reads_only_declared_inputs() {
        for (tilt, centered, level) in [(0.02, 0.02, 0.2), (0.07, 0.15, 0.45), (0.2, 0.0, 0.3)] {
            let full = FeatureSet {
                eye_openness: 0.3,
                mouth_openness: 0.3,
                eyebrow_position: 0.5,
                mouth_corner_lift: -0.02,
                eyelid_droop: 0.05,
                ..head(tilt, centered, level)
            };
            let selected = PartialFeatures::from(full)
                .select(PostureClassifier.inputs())
                .unwrap();
            assert_eq!(
                PostureClassifier.classify(&selected),
                PostureClassifier.classify(&full)
            );
        }
    }

    #[rstest]
    #[case::mouth(Feature::MouthOpenness)]
    #[case::eyes(Feature::EyeOpenness)]
    #[case::eyelids(Feature::EyelidDroop)]
    fn test_unread_failures_keep_posture(#[case] failed: Feature) {
        let partial = PartialFeatures::from(head(0.02, 0.02, 0.2))
            .with_error(failed, FeatureError::DegenerateGeometry("mouth"));
        assert_eq!(
            PostureClassifier.classify_or_invalid(Some(&partial)),
            ClassificationResult::new(Posture::Excellent, 0.9)
        );
    }

    #[test]
    fn test_missing_eye_level_reports_unknown() {
        let partial = PartialFeatures::from(head(0.02, 0.02, 0.2)).with_error(
            Feature::EyeLevel,
            FeatureError::NonFiniteCoordinate { index: 33 },
        );
        assert_eq!(
            PostureClassifier.classify_or_invalid(Some(&partial)),
            ClassificationResult::new(Posture::Unknown, 0.5)
        );
    }
}
