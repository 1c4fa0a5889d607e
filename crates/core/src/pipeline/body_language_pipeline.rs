use std::time::Instant;

use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::emotion_classifier::EmotionClassifier;
use crate::classification::domain::fatigue_classifier::FatigueClassifier;
use crate::classification::domain::posture_classifier::PostureClassifier;
use crate::features::domain::feature_extractor::extract_partial;
use crate::output::domain::snapshot::{timestamp_from_millis, BodyLanguageSnapshot};
use crate::output::domain::snapshot_sink::SnapshotSink;
use crate::shared::classification::{ClassificationResult, Emotion, Fatigue, Posture};
use crate::shared::landmark_frame::{FaceObservation, LandmarkFrame};
use crate::smoothing::domain::emotion_smoother::{EmotionSmoother, EmotionSmootherInterface};

use super::cadence_gate::CadenceGate;
use super::pipeline_config::PipelineConfig;
use super::pipeline_logger::PipelineLogger;

/// What one frame produced, for callers that render live status.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    /// Stabilized emotion after this frame was recorded.
    pub emotion: ClassificationResult<Emotion>,
    /// `None` on frames without a face.
    pub posture: Option<ClassificationResult<Posture>>,
    pub fatigue: Option<ClassificationResult<Fatigue>>,
    /// The snapshot delivered to the sink on this frame, if any.
    pub emitted: Option<BodyLanguageSnapshot>,
}

/// Per-frame orchestration: features, classifiers, smoothing and
/// cadence-gated delivery to the sink.
///
/// All run state (emotion history, last emission time) lives on the
/// instance; two pipelines never share anything.
pub struct BodyLanguagePipeline {
    emotion: EmotionClassifier,
    posture: PostureClassifier,
    fatigue: FatigueClassifier,
    smoother: Box<dyn EmotionSmootherInterface>,
    gate: CadenceGate,
    sink: Box<dyn SnapshotSink>,
    logger: Box<dyn PipelineLogger>,
    frames_seen: usize,
}

impl BodyLanguagePipeline {
    pub fn new(
        config: &PipelineConfig,
        sink: Box<dyn SnapshotSink>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        let smoother = EmotionSmoother::new(
            config.history_size,
            config.stability_window,
            config.min_consistency,
        );
        Self {
            emotion: EmotionClassifier,
            posture: PostureClassifier,
            fatigue: FatigueClassifier,
            smoother: Box::new(smoother),
            gate: CadenceGate::new(config.cadence_ms),
            sink,
            logger,
            frames_seen: 0,
        }
    }

    /// Replaces the default majority-vote smoother.
    pub fn with_smoother(mut self, smoother: Box<dyn EmotionSmootherInterface>) -> Self {
        self.smoother = smoother;
        self
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub fn last_emit_ms(&self) -> Option<u64> {
        self.gate.last_emit_ms()
    }

    /// Processes one observation captured at `now_ms` (Unix-epoch millis).
    pub fn process_frame(&mut self, observation: &FaceObservation, now_ms: u64) -> FrameOutcome {
        self.frames_seen += 1;
        let outcome = match observation {
            FaceObservation::Face(frame) => self.process_face(frame, now_ms),
            FaceObservation::NoFace => self.process_absence(),
        };
        self.logger
            .frame(self.frames_seen, matches!(observation, FaceObservation::Face(_)));
        outcome
    }

    /// Forwards a run-level status message to the pipeline logger.
    pub fn info(&mut self, message: &str) {
        self.logger.info(message);
    }

    /// Flushes the logger's end-of-run summary.
    pub fn finish(&mut self) {
        self.logger.summary();
    }

    fn process_face(&mut self, frame: &LandmarkFrame, now_ms: u64) -> FrameOutcome {
        let t0 = Instant::now();
        let features = match extract_partial(frame) {
            Ok(features) => Some(features),
            Err(e) => {
                log::debug!("Frame {}: {e}", self.frames_seen);
                None
            }
        };
        let t1 = Instant::now();

        let emotion = self.emotion.classify_or_invalid(features.as_ref());
        let posture = self.posture.classify_or_invalid(features.as_ref());
        let fatigue = self.fatigue.classify_or_invalid(features.as_ref());
        let t2 = Instant::now();

        let stable = self.smoother.push(emotion, true);
        let t3 = Instant::now();

        let emitted = if self.gate.is_open(now_ms) {
            let snapshot =
                BodyLanguageSnapshot::new(stable, posture, fatigue, timestamp_from_millis(now_ms));
            self.deliver(snapshot, now_ms)
        } else {
            None
        };
        let t4 = Instant::now();

        self.logger.timing("features", ms(t1 - t0));
        self.logger.timing("classify", ms(t2 - t1));
        self.logger.timing("smooth", ms(t3 - t2));
        self.logger.timing("emit", ms(t4 - t3));

        FrameOutcome {
            emotion: stable,
            posture: Some(posture),
            fatigue: Some(fatigue),
            emitted,
        }
    }

    fn process_absence(&mut self) -> FrameOutcome {
        let stable = self
            .smoother
            .push(ClassificationResult::new(Emotion::Neutral, 0.5), false);
        FrameOutcome {
            emotion: stable,
            posture: None,
            fatigue: None,
            emitted: None,
        }
    }

    /// Hands `snapshot` to the sink. The gate only advances on success so
    /// the next frame retries after a failed delivery.
    fn deliver(
        &mut self,
        snapshot: BodyLanguageSnapshot,
        now_ms: u64,
    ) -> Option<BodyLanguageSnapshot> {
        match self.sink.send(&snapshot) {
            Ok(()) => {
                self.gate.record_emit(now_ms);
                self.logger.emitted(&snapshot);
                Some(snapshot)
            }
            Err(e) => {
                log::warn!("Failed to deliver snapshot: {e}");
                None
            }
        }
    }
}

fn ms(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
