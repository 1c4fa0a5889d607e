use std::path::PathBuf;

use thiserror::Error;

use crate::shared::landmark_frame::FaceObservation;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("landmark source used before activation")]
    NotActivated,
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read landmarks: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid landmark record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One observation from the landmark collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFrame {
    /// Capture time in Unix-epoch milliseconds.
    pub timestamp_ms: u64,
    pub observation: FaceObservation,
}

/// Supplies landmark observations in capture order.
///
/// Construction is cheap and infallible; device or model setup happens in
/// `activate`, which must succeed before `frames` yields anything.
pub trait LandmarkSource: Send {
    fn activate(&mut self) -> Result<(), SourceError>;

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<SourceFrame, SourceError>> + '_>;
}
