use serde::{Deserialize, Serialize};

use crate::shared::constants::LANDMARK_COUNT;

/// A normalized landmark coordinate in [0, 1] image space.
///
/// `z` is the relative depth reported by face-mesh models; the heuristics
/// only read `x` and `y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One camera frame's worth of landmarks, indexed by the face-mesh topology.
///
/// A complete frame holds exactly [`LANDMARK_COUNT`] points. Shorter frames
/// are representable because upstream trackers occasionally deliver them;
/// feature extraction refuses to work on them.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: Vec<LandmarkPoint>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= LANDMARK_COUNT
    }

    pub fn get(&self, index: usize) -> Option<&LandmarkPoint> {
        self.points.get(index)
    }
}

/// What the landmark collaborator observed in one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FaceObservation {
    Face(LandmarkFrame),
    NoFace,
}

impl From<Option<LandmarkFrame>> for FaceObservation {
    fn from(frame: Option<LandmarkFrame>) -> Self {
        match frame {
            Some(frame) => FaceObservation::Face(frame),
            None => FaceObservation::NoFace,
        }
    }
}
