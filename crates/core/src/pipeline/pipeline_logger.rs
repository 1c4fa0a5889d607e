use std::collections::HashMap;
use std::time::Instant;

use crate::output::domain::snapshot::BodyLanguageSnapshot;
use crate::shared::classification::Emotion;

/// Cross-cutting observer for per-frame pipeline events.
///
/// Keeps the orchestrator free of output concerns so the CLI, an embedding
/// application and tests can each observe a run differently.
pub trait PipelineLogger: Send {
    /// Called once per processed frame with the running frame count.
    fn frame(&mut self, frames_seen: usize, face_detected: bool);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Called after a snapshot was delivered to the sink.
    fn emitted(&mut self, snapshot: &BodyLanguageSnapshot);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame(&mut self, _frames_seen: usize, _face_detected: bool) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn emitted(&mut self, _snapshot: &BodyLanguageSnapshot) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger for command-line runs: throttled progress through `log`, stage
/// timings, and a run summary with the distribution of emitted emotions.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames: usize,
    face_frames: usize,
    snapshots: usize,
    emotions: HashMap<Emotion, usize>,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            face_frames: 0,
            snapshots: 0,
            emotions: HashMap::new(),
        }
    }

    /// Returns the formatted summary, or `None` if no frame was seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let face_pct = self.face_frames as f64 / self.frames as f64 * 100.0;
        let mut lines = vec![format!(
            "Pipeline summary ({} frames, {face_pct:.1}% with a face, {} snapshots, {:.1}s):",
            self.frames,
            self.snapshots,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:7.3}ms  total {total_ms:8.1}ms"
            ));
        }

        for emotion in Emotion::ALL {
            if let Some(count) = self.emotions.get(&emotion) {
                lines.push(format!("  {emotion}: {count}"));
            }
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn frame(&mut self, frames_seen: usize, face_detected: bool) {
        self.frames = frames_seen;
        if face_detected {
            self.face_frames += 1;
        }
        if frames_seen % self.throttle_frames == 0 {
            log::info!("Processed {frames_seen} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn emitted(&mut self, snapshot: &BodyLanguageSnapshot) {
        self.snapshots += 1;
        *self.emotions.entry(snapshot.emotion).or_default() += 1;
        log::info!(
            "Snapshot: emotion={} posture={} fatigue={}",
            snapshot.emotion,
            snapshot.posture.label,
            snapshot.fatigue.label
        );
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
