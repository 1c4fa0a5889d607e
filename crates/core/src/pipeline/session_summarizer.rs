use serde::Serialize;

use crate::output::domain::snapshot::BodyLanguageSnapshot;
use crate::shared::classification::{Emotion, Fatigue, Posture};
use crate::shared::constants::{DEFAULT_SUMMARY_MIN_POINTS, DEFAULT_SUMMARY_WINDOW_MS};

/// Aggregate over the snapshots emitted during one summary window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub dominant_emotion: Emotion,
    pub good_posture_ratio: f64,
    pub tired_ratio: f64,
    pub data_points: usize,
}

impl SessionSummary {
    /// Summarizes `snapshots`, or `None` for an empty slice.
    pub fn from_snapshots(snapshots: &[BodyLanguageSnapshot]) -> Option<Self> {
        let total = snapshots.len();
        if total == 0 {
            return None;
        }

        let mut tally: Vec<(Emotion, usize)> = Vec::new();
        for snapshot in snapshots {
            match tally.iter_mut().find(|(e, _)| *e == snapshot.emotion) {
                Some((_, count)) => *count += 1,
                None => tally.push((snapshot.emotion, 1)),
            }
        }
        let mut dominant = tally[0];
        for &(emotion, count) in &tally[1..] {
            if count > dominant.1 {
                dominant = (emotion, count);
            }
        }

        let good = snapshots
            .iter()
            .filter(|s| s.posture.label == Posture::Good)
            .count();
        let tired = snapshots
            .iter()
            .filter(|s| s.fatigue.label == Fatigue::Tired)
            .count();

        Some(Self {
            dominant_emotion: dominant.0,
            good_posture_ratio: good as f64 / total as f64,
            tired_ratio: tired as f64 / total as f64,
            data_points: total,
        })
    }
}

/// Buffers emitted snapshots and reports a [`SessionSummary`] once per
/// window.
///
/// The window opens with the first snapshot. When a snapshot arrives at or
/// after the window's end the buffer is summarized (if it holds at least
/// `min_points` entries) and cleared, and a new window starts.
pub struct SessionSummarizer {
    window_ms: u64,
    min_points: usize,
    window_start_ms: Option<u64>,
    buffer: Vec<BodyLanguageSnapshot>,
}

impl SessionSummarizer {
    pub fn new(window_ms: u64, min_points: usize) -> Self {
        Self {
            window_ms,
            min_points,
            window_start_ms: None,
            buffer: Vec::new(),
        }
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn push(
        &mut self,
        snapshot: BodyLanguageSnapshot,
        now_ms: u64,
    ) -> Option<SessionSummary> {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.buffer.push(snapshot);

        if now_ms.saturating_sub(start) < self.window_ms {
            return None;
        }

        let summary = if self.buffer.len() >= self.min_points {
            SessionSummary::from_snapshots(&self.buffer)
        } else {
            log::debug!(
                "Skipping summary: {} of {} points",
                self.buffer.len(),
                self.min_points
            );
            None
        };
        self.buffer.clear();
        self.window_start_ms = Some(now_ms);
        summary
    }
}

impl Default for SessionSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_WINDOW_MS, DEFAULT_SUMMARY_MIN_POINTS)
    }
}
