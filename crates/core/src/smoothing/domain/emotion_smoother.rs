use std::collections::VecDeque;

use crate::shared::classification::{ClassificationResult, Emotion};
use crate::shared::constants::{
    DEFAULT_HISTORY_SIZE, DEFAULT_MIN_CONSISTENCY, DEFAULT_STABILITY_WINDOW, INVALID_CONFIDENCE,
};

/// Face-detected entries required inside the stability window.
pub const MIN_FACE_FRAMES: usize = 2;
/// Only entries above this confidence take part in the vote.
pub const MIN_VOTE_CONFIDENCE: f64 = 0.5;
/// Reported when the vote is too split to trust.
pub const INCONSISTENT_CONFIDENCE: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionHistoryEntry {
    pub emotion: Emotion,
    pub confidence: f64,
    pub face_detected: bool,
}

/// Domain interface for temporal stabilization of emotion classifications.
pub trait EmotionSmootherInterface: Send {
    /// Records one frame's classification and returns the stabilized label.
    fn push(
        &mut self,
        result: ClassificationResult<Emotion>,
        face_detected: bool,
    ) -> ClassificationResult<Emotion>;
}

/// Rolling majority vote over recent emotion classifications.
///
/// Keeps the last `capacity` entries; each query votes over the last
/// `window` of them. The modal label must account for at least
/// `min_consistency` of the face-detected frames in the window.
pub struct EmotionSmoother {
    capacity: usize,
    window: usize,
    min_consistency: f64,
    history: VecDeque<EmotionHistoryEntry>,
}

impl EmotionSmoother {
    pub fn new(capacity: usize, window: usize, min_consistency: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            window: window.clamp(1, capacity),
            min_consistency,
            history: VecDeque::with_capacity(capacity),
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &EmotionHistoryEntry> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    fn record(&mut self, entry: EmotionHistoryEntry) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(entry);
    }

    /// Majority vote over the most recent `window` entries.
    pub fn stable(&self) -> ClassificationResult<Emotion> {
        let skip = self.history.len().saturating_sub(self.window);
        let recent: Vec<&EmotionHistoryEntry> = self.history.iter().skip(skip).collect();

        let face_frames = recent.iter().filter(|e| e.face_detected).count();
        if face_frames < MIN_FACE_FRAMES {
            return ClassificationResult::new(Emotion::Neutral, INVALID_CONFIDENCE);
        }

        // Insertion-ordered tally so ties resolve to the first label seen.
        let mut tally: Vec<(Emotion, usize)> = Vec::new();
        for entry in recent
            .iter()
            .filter(|e| e.face_detected && e.confidence > MIN_VOTE_CONFIDENCE)
        {
            match tally.iter_mut().find(|(emotion, _)| *emotion == entry.emotion) {
                Some((_, count)) => *count += 1,
                None => tally.push((entry.emotion, 1)),
            }
        }

        let Some(&(first, first_count)) = tally.first() else {
            return ClassificationResult::new(Emotion::Neutral, INVALID_CONFIDENCE);
        };
        let (modal, modal_count) = tally
            .iter()
            .skip(1)
            .fold((first, first_count), |best, &(emotion, count)| {
                if count > best.1 {
                    (emotion, count)
                } else {
                    best
                }
            });

        let consistency = modal_count as f64 / face_frames as f64;
        if consistency < self.min_consistency {
            return ClassificationResult::new(Emotion::Neutral, INCONSISTENT_CONFIDENCE);
        }

        ClassificationResult::new(modal, consistency.max(MIN_VOTE_CONFIDENCE))
    }
}

impl Default for EmotionSmoother {
    fn default() -> Self {
        Self::new(
            DEFAULT_HISTORY_SIZE,
            DEFAULT_STABILITY_WINDOW,
            DEFAULT_MIN_CONSISTENCY,
        )
    }
}

impl EmotionSmootherInterface for EmotionSmoother {
    fn push(
        &mut self,
        result: ClassificationResult<Emotion>,
        face_detected: bool,
    ) -> ClassificationResult<Emotion> {
        self.record(EmotionHistoryEntry {
            emotion: result.label,
            confidence: result.confidence,
            face_detected,
        });
        self.stable()
    }
}
