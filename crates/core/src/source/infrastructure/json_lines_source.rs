use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::shared::landmark_frame::{FaceObservation, LandmarkFrame, LandmarkPoint};
use crate::source::domain::landmark_source::{LandmarkSource, SourceError, SourceFrame};

/// Recorded frame as stored on disk: `landmarks` is `null` or absent when
/// the tracker found no face.
#[derive(Deserialize)]
struct RecordedFrame {
    timestamp_ms: u64,
    #[serde(default)]
    landmarks: Option<Vec<LandmarkPoint>>,
}

enum Origin {
    Path(PathBuf),
    Reader(Box<dyn BufRead + Send>),
    Consumed,
}

/// Replays a landmark recording stored as JSON lines.
///
/// Blank lines are skipped; line numbers in parse errors are 1-based.
pub struct JsonLinesSource {
    origin: Origin,
    reader: Option<Box<dyn BufRead + Send>>,
}

impl JsonLinesSource {
    /// Source that opens `path` on activation.
    pub fn from_path(path: &Path) -> Self {
        Self {
            origin: Origin::Path(path.to_path_buf()),
            reader: None,
        }
    }

    /// Source over an already-open stream such as stdin.
    pub fn from_reader(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            origin: Origin::Reader(reader),
            reader: None,
        }
    }
}

impl LandmarkSource for JsonLinesSource {
    fn activate(&mut self) -> Result<(), SourceError> {
        if self.reader.is_some() {
            return Ok(());
        }
        let reader: Box<dyn BufRead + Send> =
            match std::mem::replace(&mut self.origin, Origin::Consumed) {
                Origin::Path(path) => match File::open(&path) {
                    Ok(file) => Box::new(BufReader::new(file)),
                    Err(source) => {
                        let err = SourceError::Open {
                            path: path.clone(),
                            source,
                        };
                        self.origin = Origin::Path(path);
                        return Err(err);
                    }
                },
                Origin::Reader(reader) => reader,
                Origin::Consumed => return Err(SourceError::NotActivated),
            };
        self.reader = Some(reader);
        Ok(())
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<SourceFrame, SourceError>> + '_> {
        let Some(reader) = self.reader.as_mut() else {
            return Box::new(std::iter::once(Err(SourceError::NotActivated)));
        };

        Box::new(
            reader
                .lines()
                .enumerate()
                .filter_map(|(i, line)| match line {
                    Err(e) => Some(Err(SourceError::Read(e))),
                    Ok(line) if line.trim().is_empty() => None,
                    Ok(line) => Some(parse_line(&line, i + 1)),
                }),
        )
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<SourceFrame, SourceError> {
    let record: RecordedFrame =
        serde_json::from_str(line).map_err(|source| SourceError::Parse {
            line: line_number,
            source,
        })?;
    let observation = FaceObservation::from(record.landmarks.map(LandmarkFrame::new));
    Ok(SourceFrame {
        timestamp_ms: record.timestamp_ms,
        observation,
    })
}
