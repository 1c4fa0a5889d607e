use crate::shared::landmark_frame::FaceObservation;
use crate::source::domain::landmark_source::{LandmarkSource, SourceError};

use super::body_language_pipeline::BodyLanguagePipeline;
use super::session_summarizer::{SessionSummarizer, SessionSummary};

/// Counts for one completed replay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplayReport {
    pub frames: usize,
    pub face_frames: usize,
    pub snapshots: usize,
    pub summaries: usize,
}

/// Drives a [`BodyLanguagePipeline`] from a [`LandmarkSource`].
///
/// Frames are processed in source order using their recorded timestamps as
/// the pipeline clock. The first source error ends the run.
pub struct ReplayRecordingUseCase {
    source: Box<dyn LandmarkSource>,
    pipeline: BodyLanguagePipeline,
    summarizer: Option<SessionSummarizer>,
    on_summary: Option<Box<dyn FnMut(&SessionSummary) + Send>>,
}

impl ReplayRecordingUseCase {
    pub fn new(source: Box<dyn LandmarkSource>, pipeline: BodyLanguagePipeline) -> Self {
        Self {
            source,
            pipeline,
            summarizer: None,
            on_summary: None,
        }
    }

    /// Aggregates emitted snapshots and calls `on_summary` for each window
    /// that produced a summary.
    pub fn with_summaries(
        mut self,
        summarizer: SessionSummarizer,
        on_summary: Box<dyn FnMut(&SessionSummary) + Send>,
    ) -> Self {
        self.summarizer = Some(summarizer);
        self.on_summary = Some(on_summary);
        self
    }

    pub fn execute(&mut self) -> Result<ReplayReport, SourceError> {
        self.source.activate()?;
        self.pipeline.info("Landmark source activated");

        let mut report = ReplayReport::default();
        for frame in self.source.frames() {
            let frame = frame?;
            report.frames += 1;
            if matches!(frame.observation, FaceObservation::Face(_)) {
                report.face_frames += 1;
            }

            let outcome = self
                .pipeline
                .process_frame(&frame.observation, frame.timestamp_ms);
            let Some(snapshot) = outcome.emitted else {
                continue;
            };
            report.snapshots += 1;

            if let Some(summarizer) = self.summarizer.as_mut() {
                if let Some(summary) = summarizer.push(snapshot, frame.timestamp_ms) {
                    report.summaries += 1;
                    self.pipeline.info(&format!(
                        "Session summary: dominant={} good_posture={:.1}% tired={:.1}% points={}",
                        summary.dominant_emotion,
                        summary.good_posture_ratio * 100.0,
                        summary.tired_ratio * 100.0,
                        summary.data_points
                    ));
                    if let Some(callback) = self.on_summary.as_mut() {
                        callback(&summary);
                    }
                }
            }
        }

        self.pipeline.finish();
        Ok(report)
    }
}
