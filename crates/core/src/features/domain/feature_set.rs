use thiserror::Error;

/// Scalar facial ratios derived from one complete landmark frame.
///
/// All values are in normalized image units; y grows downward, so a larger
/// `eyebrow_position` means lower eyebrows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeatureSet {
    /// Vertical eye opening over eye width, averaged over both eyes.
    pub eye_openness: f64,
    /// Vertical lip gap over mouth width.
    pub mouth_openness: f64,
    /// Mean eyebrow y, averaged over both eyebrows.
    pub eyebrow_position: f64,
    /// Positive when the mouth corners sit above the upper-lip baseline.
    pub mouth_corner_lift: f64,
    /// Horizontal offset between the eye midpoint and the ear midpoint.
    pub head_tilt: f64,
    /// Horizontal distance of the nose tip from the image center.
    pub head_centered_offset: f64,
    /// Mean y of the two eye reference points.
    pub eye_level: f64,
    /// Mean drop of the upper eyelids below the eye reference points.
    pub eyelid_droop: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("expected {expected} landmarks, got {actual}")]
    InsufficientLandmarks { expected: usize, actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("degenerate geometry: {0} has zero width")]
    DegenerateGeometry(&'static str),
}

/// Names one field of [`FeatureSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    EyeOpenness,
    MouthOpenness,
    EyebrowPosition,
    MouthCornerLift,
    HeadTilt,
    HeadCenteredOffset,
    EyeLevel,
    EyelidDroop,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::EyeOpenness,
        Feature::MouthOpenness,
        Feature::EyebrowPosition,
        Feature::MouthCornerLift,
        Feature::HeadTilt,
        Feature::HeadCenteredOffset,
        Feature::EyeLevel,
        Feature::EyelidDroop,
    ];
}

impl FeatureSet {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::EyeOpenness => self.eye_openness,
            Feature::MouthOpenness => self.mouth_openness,
            Feature::EyebrowPosition => self.eyebrow_position,
            Feature::MouthCornerLift => self.mouth_corner_lift,
            Feature::HeadTilt => self.head_tilt,
            Feature::HeadCenteredOffset => self.head_centered_offset,
            Feature::EyeLevel => self.eye_level,
            Feature::EyelidDroop => self.eyelid_droop,
        }
    }

    fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::EyeOpenness => &mut self.eye_openness,
            Feature::MouthOpenness => &mut self.mouth_openness,
            Feature::EyebrowPosition => &mut self.eyebrow_position,
            Feature::MouthCornerLift => &mut self.mouth_corner_lift,
            Feature::HeadTilt => &mut self.head_tilt,
            Feature::HeadCenteredOffset => &mut self.head_centered_offset,
            Feature::EyeLevel => &mut self.eye_level,
            Feature::EyelidDroop => &mut self.eyelid_droop,
        };
        *slot = value;
    }
}

/// Extraction outcome per feature.
///
/// Each feature reads its own landmark group, so a collapsed mouth or a
/// non-finite eyelid point only makes the features built from it
/// unavailable.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialFeatures {
    values: [Result<f64, FeatureError>; 8],
}

impl PartialFeatures {
    /// `values` is indexed in [`Feature::ALL`] order.
    pub fn new(values: [Result<f64, FeatureError>; 8]) -> Self {
        Self { values }
    }

    pub fn get(&self, feature: Feature) -> Result<f64, FeatureError> {
        self.values[feature as usize].clone()
    }

    /// A [`FeatureSet`] holding `inputs`; fields not listed stay zero.
    /// Fails with the first unavailable input.
    pub fn select(&self, inputs: &[Feature]) -> Result<FeatureSet, FeatureError> {
        let mut set = FeatureSet::default();
        for &feature in inputs {
            set.set(feature, self.get(feature)?);
        }
        Ok(set)
    }

    pub fn complete(&self) -> Result<FeatureSet, FeatureError> {
        self.select(&Feature::ALL)
    }

    pub fn unavailable(&self) -> impl Iterator<Item = (Feature, &FeatureError)> {
        Feature::ALL
            .into_iter()
            .zip(self.values.iter())
            .filter_map(|(feature, value)| value.as_ref().err().map(|e| (feature, e)))
    }

    #[cfg(test)]
    pub(crate) fn with_error(mut self, feature: Feature, error: FeatureError) -> Self {
        self.values[feature as usize] = Err(error);
        self
    }
}

impl From<FeatureSet> for PartialFeatures {
    fn from(set: FeatureSet) -> Self {
        Self::new(Feature::ALL.map(|feature| Ok(set.get(feature))))
    }
}
