use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::classification::{ClassificationResult, Emotion, Fatigue, Posture};

/// Per-field confidences, repeated alongside the labels for consumers that
/// only read the flat fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfidence {
    pub emotion: f64,
    pub posture: f64,
    pub fatigue: f64,
}

/// Record handed to the sink at most once per cadence interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "body_language")]
pub struct BodyLanguageSnapshot {
    pub emotion: Emotion,
    pub posture: ClassificationResult<Posture>,
    pub fatigue: ClassificationResult<Fatigue>,
    pub confidence: SnapshotConfidence,
    pub timestamp: DateTime<Utc>,
}

impl BodyLanguageSnapshot {
    pub fn new(
        emotion: ClassificationResult<Emotion>,
        posture: ClassificationResult<Posture>,
        fatigue: ClassificationResult<Fatigue>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            emotion: emotion.label,
            posture,
            fatigue,
            confidence: SnapshotConfidence {
                emotion: emotion.confidence,
                posture: posture.confidence,
                fatigue: fatigue.confidence,
            },
            timestamp,
        }
    }
}

/// Converts a Unix-epoch millisecond timestamp to UTC, clamping values past
/// the representable range to the latest representable instant.
pub fn timestamp_from_millis(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .unwrap_or_else(|| {
            log::warn!("Timestamp {ms}ms is out of range, clamping");
            DateTime::<Utc>::MAX_UTC
        })
}
