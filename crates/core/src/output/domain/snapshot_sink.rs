use thiserror::Error;

use super::snapshot::BodyLanguageSnapshot;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot receiver disconnected")]
    Disconnected,
}

/// Destination for periodic snapshots.
///
/// Delivery guarantees (ordering, retries, backpressure) belong to the
/// implementation; the pipeline only decides when to call `send`.
pub trait SnapshotSink: Send {
    fn send(&mut self, snapshot: &BodyLanguageSnapshot) -> Result<(), SinkError>;
}

/// Sink that drops every snapshot.
pub struct NullSnapshotSink;

impl SnapshotSink for NullSnapshotSink {
    fn send(&mut self, _snapshot: &BodyLanguageSnapshot) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::domain::snapshot::timestamp_from_millis;
    use crate::shared::classification::{ClassificationResult, Emotion, Fatigue, Posture};

    #[test]
    fn test_null_sink_accepts_everything() {
        let snapshot = BodyLanguageSnapshot::new(
            ClassificationResult::new(Emotion::Happy, 0.6),
            ClassificationResult::new(Posture::Good, 0.8),
            ClassificationResult::new(Fatigue::Alert, 0.9),
            timestamp_from_millis(0),
        );
        let mut sink = NullSnapshotSink;
        for _ in 0..3 {
            assert!(sink.send(&snapshot).is_ok());
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SinkError::Disconnected.to_string(),
            "snapshot receiver disconnected"
        );
        let io = SinkError::from(std::io::Error::other("disk full"));
        assert_eq!(io.to_string(), "failed to write snapshot: disk full");
    }
}
