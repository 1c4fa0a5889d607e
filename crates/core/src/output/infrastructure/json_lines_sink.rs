use std::io::Write;

use crate::output::domain::snapshot::BodyLanguageSnapshot;
use crate::output::domain::snapshot_sink::{SinkError, SnapshotSink};

/// Writes each snapshot as one JSON object per line.
///
/// Flushes after every line so consumers tailing the output see snapshots
/// as soon as they are emitted.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    written: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> SnapshotSink for JsonLinesSink<W> {
    fn send(&mut self, snapshot: &BodyLanguageSnapshot) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::domain::snapshot::timestamp_from_millis;
    use crate::shared::classification::{ClassificationResult, Emotion, Fatigue, Posture};

    fn snapshot(emotion: Emotion) -> BodyLanguageSnapshot {
        BodyLanguageSnapshot::new(
            ClassificationResult::new(emotion, 0.7),
            ClassificationResult::new(Posture::Fair, 0.6),
            ClassificationResult::new(Fatigue::Alert, 0.9),
            timestamp_from_millis(0),
        )
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_snapshot() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.send(&snapshot(Emotion::Happy)).unwrap();
        sink.send(&snapshot(Emotion::Sad)).unwrap();
        assert_eq!(sink.written(), 2);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: BodyLanguageSnapshot = serde_json::from_str(lines[0]).unwrap();
        let second: BodyLanguageSnapshot = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first.emotion, Emotion::Happy);
        assert_eq!(second.emotion, Emotion::Sad);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut sink = JsonLinesSink::new(FailingWriter);
        let result = sink.send(&snapshot(Emotion::Happy));
        assert!(result.is_err());
        assert_eq!(sink.written(), 0);
    }
}
