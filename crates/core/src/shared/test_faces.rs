//! Synthetic face-mesh frames for tests.
//!
//! The builder places only the landmarks the feature extractor reads, with
//! spans chosen so each feature can be dialed in directly: eye width is 0.06,
//! mouth width is 0.1 and the eye midpoint sits at x = 0.47.

use crate::shared::constants::{
    LANDMARK_COUNT, LEFT_EAR, LEFT_EYEBROW, LEFT_EYE_CONTOUR, LEFT_MOUTH_CORNER,
    LEFT_UPPER_EYELID, MOUTH_CONTOUR, NOSE_TIP, RIGHT_EAR, RIGHT_EYEBROW, RIGHT_EYE_CONTOUR,
    RIGHT_MOUTH_CORNER, RIGHT_UPPER_EYELID, UPPER_LIP_LEFT, UPPER_LIP_RIGHT,
};
use crate::shared::landmark_frame::{LandmarkFrame, LandmarkPoint};

const EYE_WIDTH: f64 = 0.06;
const MOUTH_WIDTH: f64 = 0.1;
const MOUTH_Y: f64 = 0.60;

#[derive(Clone, Debug)]
pub struct FaceBuilder {
    eye_openness: f64,
    mouth_openness: f64,
    eyebrow_position: f64,
    mouth_corner_lift: f64,
    head_tilt: f64,
    nose_x: f64,
    eye_level: f64,
    eyelid_droop: f64,
}

impl Default for FaceBuilder {
    fn default() -> Self {
        Self {
            eye_openness: 0.15,
            mouth_openness: 0.15,
            eyebrow_position: 0.32,
            mouth_corner_lift: 0.0,
            head_tilt: 0.0,
            nose_x: 0.5,
            eye_level: 0.40,
            eyelid_droop: 0.0,
        }
    }
}

impl FaceBuilder {
    pub fn eye_openness(mut self, value: f64) -> Self {
        self.eye_openness = value;
        self
    }

    pub fn mouth_openness(mut self, value: f64) -> Self {
        self.mouth_openness = value;
        self
    }

    pub fn eyebrow_position(mut self, value: f64) -> Self {
        self.eyebrow_position = value;
        self
    }

    pub fn mouth_corner_lift(mut self, value: f64) -> Self {
        self.mouth_corner_lift = value;
        self
    }

    pub fn head_tilt(mut self, value: f64) -> Self {
        self.head_tilt = value;
        self
    }

    pub fn nose_x(mut self, value: f64) -> Self {
        self.nose_x = value;
        self
    }

    pub fn eye_level(mut self, value: f64) -> Self {
        self.eye_level = value;
        self
    }

    pub fn eyelid_droop(mut self, value: f64) -> Self {
        self.eyelid_droop = value;
        self
    }

    pub fn build(&self) -> LandmarkFrame {
        let mut pts = vec![LandmarkPoint::new(0.5, 0.5); LANDMARK_COUNT];
        let level = self.eye_level;
        let eye_gap = self.eye_openness * EYE_WIDTH;

        self.place_eye(&mut pts, &LEFT_EYE_CONTOUR, 0.40, eye_gap);
        self.place_eye(&mut pts, &RIGHT_EYE_CONTOUR, 0.54, eye_gap);

        pts[LEFT_EAR] = LandmarkPoint::new(0.30 - self.head_tilt, level);
        pts[RIGHT_EAR] = LandmarkPoint::new(0.64 - self.head_tilt, level);
        pts[NOSE_TIP] = LandmarkPoint::new(self.nose_x, 0.5);

        pts[MOUTH_CONTOUR[0]] = LandmarkPoint::new(0.45, MOUTH_Y);
        pts[MOUTH_CONTOUR[6]] = LandmarkPoint::new(0.45 + MOUTH_WIDTH, MOUTH_Y);
        pts[MOUTH_CONTOUR[1]] = LandmarkPoint::new(0.50, MOUTH_Y);
        pts[MOUTH_CONTOUR[7]] =
            LandmarkPoint::new(0.50, MOUTH_Y + self.mouth_openness * MOUTH_WIDTH);

        pts[LEFT_MOUTH_CORNER] = LandmarkPoint::new(0.45, MOUTH_Y);
        pts[RIGHT_MOUTH_CORNER] = LandmarkPoint::new(0.55, MOUTH_Y);
        pts[UPPER_LIP_LEFT] = LandmarkPoint::new(0.50, MOUTH_Y + self.mouth_corner_lift);
        pts[UPPER_LIP_RIGHT] = LandmarkPoint::new(0.50, MOUTH_Y + self.mouth_corner_lift);

        for &i in LEFT_EYEBROW.iter().chain(RIGHT_EYEBROW.iter()) {
            pts[i].y = self.eyebrow_position;
        }

        pts[LEFT_UPPER_EYELID] = LandmarkPoint::new(0.42, level + self.eyelid_droop);
        pts[RIGHT_UPPER_EYELID] = LandmarkPoint::new(0.56, level + self.eyelid_droop);

        LandmarkFrame::new(pts)
    }

    fn place_eye(&self, pts: &mut [LandmarkPoint], contour: &[usize; 16], outer_x: f64, gap: f64) {
        let level = self.eye_level;
        let mid_x = outer_x + EYE_WIDTH / 2.0;
        pts[contour[0]] = LandmarkPoint::new(outer_x, level);
        pts[contour[8]] = LandmarkPoint::new(outer_x + EYE_WIDTH, level);
        pts[contour[1]] = LandmarkPoint::new(mid_x, level);
        pts[contour[5]] = LandmarkPoint::new(mid_x, level + gap);
    }
}
