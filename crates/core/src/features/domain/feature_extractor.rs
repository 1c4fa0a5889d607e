//! Geometric feature extraction from face-mesh landmarks.
//!
//! Every feature is a single-axis distance or ratio over a handful of fixed
//! landmark indices. Ratios divide by a horizontal span (eye or mouth width)
//! and fail on a zero span instead of producing inf/NaN. Features are
//! computed independently: a fault in one landmark group leaves the others
//! intact.

use crate::features::domain::feature_set::{FeatureError, FeatureSet, PartialFeatures};
use crate::shared::constants::{
    LANDMARK_COUNT, LEFT_EAR, LEFT_EYEBROW, LEFT_EYE_CONTOUR, LEFT_EYE_OUTER, LEFT_MOUTH_CORNER,
    LEFT_UPPER_EYELID, MOUTH_CONTOUR, NOSE_TIP, RIGHT_EAR, RIGHT_EYEBROW, RIGHT_EYE_CONTOUR,
    RIGHT_EYE_INNER, RIGHT_MOUTH_CORNER, RIGHT_UPPER_EYELID, UPPER_LIP_LEFT, UPPER_LIP_RIGHT,
};
use crate::shared::landmark_frame::{LandmarkFrame, LandmarkPoint};

/// Computes every feature of one frame, each with its own outcome.
///
/// Only a frame with fewer than [`LANDMARK_COUNT`] points fails as a whole.
/// Pure: the same frame always yields the same features.
pub fn extract_partial(frame: &LandmarkFrame) -> Result<PartialFeatures, FeatureError> {
    if !frame.is_complete() {
        return Err(FeatureError::InsufficientLandmarks {
            expected: LANDMARK_COUNT,
            actual: frame.len(),
        });
    }
    let lm = Landmarks(frame.points());

    let features = PartialFeatures::new([
        eye_openness(&lm),
        contour_ratio(&lm, &MOUTH_CONTOUR, (1, 7), (0, 6), "mouth"),
        eyebrow_position(&lm),
        mouth_corner_lift(&lm),
        head_tilt(&lm),
        lm.at(NOSE_TIP).map(|nose| (nose.x - 0.5).abs()),
        eye_level(&lm),
        eyelid_droop(&lm),
    ]);

    match features.complete() {
        Ok(f) => log::debug!(
            "features: eye={:.3} mouth={:.3} brow={:.3} lift={:.3} tilt={:.3} centered={:.3} level={:.3} droop={:.3}",
            f.eye_openness,
            f.mouth_openness,
            f.eyebrow_position,
            f.mouth_corner_lift,
            f.head_tilt,
            f.head_centered_offset,
            f.eye_level,
            f.eyelid_droop,
        ),
        Err(_) => {
            for (feature, error) in features.unavailable() {
                log::debug!("{feature:?} unavailable: {error}");
            }
        }
    }

    Ok(features)
}

/// Computes the full [`FeatureSet`], failing if any feature is unavailable.
pub fn extract_features(frame: &LandmarkFrame) -> Result<FeatureSet, FeatureError> {
    extract_partial(frame)?.complete()
}

fn eye_openness(lm: &Landmarks<'_>) -> Result<f64, FeatureError> {
    let left = contour_ratio(lm, &LEFT_EYE_CONTOUR, (1, 5), (0, 8), "left eye")?;
    let right = contour_ratio(lm, &RIGHT_EYE_CONTOUR, (1, 5), (0, 8), "right eye")?;
    Ok((left + right) / 2.0)
}

fn eyebrow_position(lm: &Landmarks<'_>) -> Result<f64, FeatureError> {
    Ok((mean_y(lm, &LEFT_EYEBROW)? + mean_y(lm, &RIGHT_EYEBROW)?) / 2.0)
}

fn mouth_corner_lift(lm: &Landmarks<'_>) -> Result<f64, FeatureError> {
    let left = lm.at(UPPER_LIP_LEFT)?.y - lm.at(LEFT_MOUTH_CORNER)?.y;
    let right = lm.at(UPPER_LIP_RIGHT)?.y - lm.at(RIGHT_MOUTH_CORNER)?.y;
    Ok((left + right) / 2.0)
}

fn head_tilt(lm: &Landmarks<'_>) -> Result<f64, FeatureError> {
    let eye_center_x = (lm.at(LEFT_EYE_OUTER)?.x + lm.at(RIGHT_EYE_INNER)?.x) / 2.0;
    let ear_center_x = (lm.at(LEFT_EAR)?.x + lm.at(RIGHT_EAR)?.x) / 2.0;
    Ok((eye_center_x - ear_center_x).abs())
}

fn eye_level(lm: &Landmarks<'_>) -> Result<f64, FeatureError> {
    Ok((lm.at(LEFT_EYE_OUTER)?.y + lm.at(RIGHT_EYE_INNER)?.y) / 2.0)
}

fn eyelid_droop(lm: &Landmarks<'_>) -> Result<f64, FeatureError> {
    let left = lm.at(LEFT_UPPER_EYELID)?.y - lm.at(LEFT_EYE_OUTER)?.y;
    let right = lm.at(RIGHT_UPPER_EYELID)?.y - lm.at(RIGHT_EYE_INNER)?.y;
    Ok((left + right) / 2.0)
}

struct Landmarks<'a>(&'a [LandmarkPoint]);

impl Landmarks<'_> {
    fn at(&self, index: usize) -> Result<LandmarkPoint, FeatureError> {
        let point = self.0[index];
        if !point.is_finite() {
            return Err(FeatureError::NonFiniteCoordinate { index });
        }
        Ok(point)
    }
}

/// `|y(a) - y(b)| / |x(c) - x(d)|` over positions within a contour.
fn contour_ratio(
    lm: &Landmarks<'_>,
    contour: &[usize],
    vertical: (usize, usize),
    horizontal: (usize, usize),
    name: &'static str,
) -> Result<f64, FeatureError> {
    let height = (lm.at(contour[vertical.0])?.y - lm.at(contour[vertical.1])?.y).abs();
    let width = (lm.at(contour[horizontal.0])?.x - lm.at(contour[horizontal.1])?.x).abs();
    if width <= 0.0 {
        return Err(FeatureError::DegenerateGeometry(name));
    }
    Ok(height / width)
}

fn mean_y(lm: &Landmarks<'_>, indices: &[usize]) -> Result<f64, FeatureError> {
    let mut sum = 0.0;
    for &i in indices {
        sum += lm.at(i)?.y;
    }
    Ok(sum / indices.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::feature_set::Feature;
    use crate::shared::test_faces::FaceBuilder;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_neutral_face_features() {
        let features = extract_features(&FaceBuilder::default().build()).unwrap();

        assert_relative_eq!(features.eye_openness, 0.15, epsilon = 1e-9);
        assert_relative_eq!(features.mouth_openness, 0.15, epsilon = 1e-9);
        assert_relative_eq!(features.eyebrow_position, 0.32, epsilon = 1e-9);
        assert_relative_eq!(features.mouth_corner_lift, 0.0, epsilon = 1e-9);
        assert_relative_eq!(features.head_tilt, 0.0, epsilon = 1e-9);
        assert_relative_eq!(features.head_centered_offset, 0.0, epsilon = 1e-9);
        assert_relative_eq!(features.eye_level, 0.40, epsilon = 1e-9);
        assert_relative_eq!(features.eyelid_droop, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_configured_features_are_recovered() {
        let frame = FaceBuilder::default()
            .eye_openness(0.22)
            .mouth_openness(0.3)
            .eyebrow_position(0.28)
            .mouth_corner_lift(0.012)
            .head_tilt(0.07)
            .nose_x(0.62)
            .eye_level(0.45)
            .eyelid_droop(0.025)
            .build();

        let features = extract_features(&frame).unwrap();

        assert_relative_eq!(features.eye_openness, 0.22, epsilon = 1e-9);
        assert_relative_eq!(features.mouth_openness, 0.3, epsilon = 1e-9);
        assert_relative_eq!(features.eyebrow_position, 0.28, epsilon = 1e-9);
        assert_relative_eq!(features.mouth_corner_lift, 0.012, epsilon = 1e-9);
        assert_relative_eq!(features.head_tilt, 0.07, epsilon = 1e-9);
        assert_relative_eq!(features.head_centered_offset, 0.12, epsilon = 1e-9);
        assert_relative_eq!(features.eye_level, 0.45, epsilon = 1e-9);
        assert_relative_eq!(features.eyelid_droop, 0.025, epsilon = 1e-9);
    }

    #[test]
    fn test_frown_gives_negative_lift() {
        let frame = FaceBuilder::default().mouth_corner_lift(-0.02).build();
        let features = extract_features(&frame).unwrap();
        assert_relative_eq!(features.mouth_corner_lift, -0.02, epsilon = 1e-9);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let frame = FaceBuilder::default()
            .eye_openness(0.18)
            .mouth_corner_lift(0.004)
            .build();
        let first = extract_features(&frame).unwrap();
        let second = extract_features(&frame.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case::empty(0)]
    #[case::one_short(467)]
    #[case::half(234)]
    fn test_short_frame_is_rejected(#[case] len: usize) {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points.truncate(len);
        let result = extract_features(&LandmarkFrame::new(points));
        assert_eq!(
            result,
            Err(FeatureError::InsufficientLandmarks {
                expected: LANDMARK_COUNT,
                actual: len
            })
        );
    }

    #[test]
    fn test_extra_points_are_ignored() {
        let base = FaceBuilder::default().build();
        let mut points = base.points().to_vec();
        points.extend([LandmarkPoint::new(0.9, 0.9); 10]);
        assert_eq!(
            extract_features(&LandmarkFrame::new(points)).unwrap(),
            extract_features(&base).unwrap()
        );
    }

    #[test]
    fn test_zero_eye_width_is_degenerate() {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points[133].x = points[33].x;
        let result = extract_features(&LandmarkFrame::new(points));
        assert_eq!(result, Err(FeatureError::DegenerateGeometry("left eye")));
    }

    #[test]
    fn test_zero_mouth_width_is_degenerate() {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points[307].x = points[61].x;
        let result = extract_features(&LandmarkFrame::new(points));
        assert_eq!(result, Err(FeatureError::DegenerateGeometry("mouth")));
    }

    #[test]
    fn test_non_finite_coordinate_is_rejected() {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points[NOSE_TIP].x = f64::NAN;
        let result = extract_features(&LandmarkFrame::new(points));
        assert_eq!(
            result,
            Err(FeatureError::NonFiniteCoordinate { index: NOSE_TIP })
        );
    }

    #[test]
    fn test_unused_non_finite_point_is_tolerated() {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points[400].y = f64::INFINITY;
        assert!(extract_features(&LandmarkFrame::new(points)).is_ok());
    }

    #[test]
    fn test_collapsed_mouth_only_loses_mouth_openness() {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points[307].x = points[61].x;
        let partial = extract_partial(&LandmarkFrame::new(points)).unwrap();

        let missing: Vec<Feature> = partial.unavailable().map(|(f, _)| f).collect();
        assert_eq!(missing, [Feature::MouthOpenness]);
        assert_relative_eq!(partial.get(Feature::EyeOpenness).unwrap(), 0.15, epsilon = 1e-9);
        assert_relative_eq!(partial.get(Feature::EyeLevel).unwrap(), 0.40, epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_eye_corner_spreads_to_its_readers() {
        let mut points = FaceBuilder::default().build().points().to_vec();
        points[LEFT_EYE_OUTER].y = f64::NAN;
        let partial = extract_partial(&LandmarkFrame::new(points)).unwrap();

        let missing: Vec<Feature> = partial.unavailable().map(|(f, _)| f).collect();
        assert_eq!(
            missing,
            [
                Feature::EyeOpenness,
                Feature::HeadTilt,
                Feature::EyeLevel,
                Feature::EyelidDroop
            ]
        );
        assert_eq!(
            partial.get(Feature::EyeLevel),
            Err(FeatureError::NonFiniteCoordinate { index: LEFT_EYE_OUTER })
        );
        assert!(partial.get(Feature::MouthOpenness).is_ok());
        assert!(partial.get(Feature::HeadCenteredOffset).is_ok());
    }

    #[test]
    fn test_partial_extraction_rejects_short_frame() {
        let result = extract_partial(&LandmarkFrame::new(Vec::new()));
        assert!(matches!(
            result,
            Err(FeatureError::InsufficientLandmarks { actual: 0, .. })
        ));
    }

    #[test]
    fn test_partial_matches_full_extraction() {
        let frame = FaceBuilder::default().head_tilt(0.03).eyelid_droop(0.01).build();
        let partial = extract_partial(&frame).unwrap();
        assert_eq!(partial.complete(), extract_features(&frame));
    }
}
