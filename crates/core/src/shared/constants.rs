/// Number of points in a complete face-mesh landmark frame.
pub const LANDMARK_COUNT: usize = 468;

// Semantic landmark indices. The mapping is fixed by the face-mesh topology.
pub const NOSE_TIP: usize = 1;
pub const LEFT_EYE_OUTER: usize = 33;
pub const RIGHT_EYE_INNER: usize = 362;
pub const LEFT_EAR: usize = 234;
pub const RIGHT_EAR: usize = 454;
pub const LEFT_UPPER_EYELID: usize = 160;
pub const RIGHT_UPPER_EYELID: usize = 387;
pub const LEFT_MOUTH_CORNER: usize = 61;
pub const RIGHT_MOUTH_CORNER: usize = 291;
pub const UPPER_LIP_LEFT: usize = 0;
pub const UPPER_LIP_RIGHT: usize = 17;

/// Eye contours, starting at the outer corner. Positions 1/5 span the
/// vertical opening and 0/8 the horizontal width.
pub const LEFT_EYE_CONTOUR: [usize; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];
pub const RIGHT_EYE_CONTOUR: [usize; 16] = [
    362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
];

/// Mouth contour. Positions 1/7 span the vertical opening and 0/6 the width.
pub const MOUTH_CONTOUR: [usize; 12] = [61, 84, 17, 314, 405, 320, 307, 375, 321, 308, 324, 318];

pub const LEFT_EYEBROW: [usize; 5] = [70, 63, 105, 66, 107];
pub const RIGHT_EYEBROW: [usize; 5] = [336, 296, 334, 293, 300];

/// Minimum time between two snapshots handed to the sink.
pub const DEFAULT_CADENCE_MS: u64 = 2000;
pub const DEFAULT_HISTORY_SIZE: usize = 10;
pub const DEFAULT_STABILITY_WINDOW: usize = 5;
pub const DEFAULT_MIN_CONSISTENCY: f64 = 0.4;

pub const DEFAULT_SUMMARY_WINDOW_MS: u64 = 30_000;
pub const DEFAULT_SUMMARY_MIN_POINTS: usize = 5;

/// Confidence attached to every result produced from unusable input.
pub const INVALID_CONFIDENCE: f64 = 0.5;
