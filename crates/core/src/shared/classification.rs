use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::constants::INVALID_CONFIDENCE;

/// A closed label set produced by one classifier.
///
/// `INVALID` is the label reported when the input frame could not be
/// analyzed (no usable landmarks, degenerate geometry).
pub trait Label: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const INVALID: Self;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult<L> {
    pub label: L,
    pub confidence: f64,
}

impl<L: Label> ClassificationResult<L> {
    pub fn new(label: L, confidence: f64) -> Self {
        Self { label, confidence }
    }

    pub fn invalid() -> Self {
        Self::new(L::INVALID, INVALID_CONFIDENCE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Surprised,
    Angry,
    Fearful,
    Disgusted,
    Neutral,
}

impl Emotion {
    /// Declaration order; doubles as the scoring tie-break order.
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Disgusted,
        Emotion::Neutral,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Label for Emotion {
    const INVALID: Self = Emotion::Neutral;
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Disgusted => "disgusted",
            Emotion::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Posture {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Label for Posture {
    const INVALID: Self = Posture::Unknown;
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Posture::Excellent => "excellent",
            Posture::Good => "good",
            Posture::Fair => "fair",
            Posture::Poor => "poor",
            Posture::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fatigue {
    #[serde(rename = "alert")]
    Alert,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "tired")]
    Tired,
    #[serde(rename = "very tired")]
    VeryTired,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Label for Fatigue {
    const INVALID: Self = Fatigue::Unknown;
}

impl fmt::Display for Fatigue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fatigue::Alert => "alert",
            Fatigue::Moderate => "moderate",
            Fatigue::Tired => "tired",
            Fatigue::VeryTired => "very tired",
            Fatigue::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
