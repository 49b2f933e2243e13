//! Confidence scoring for classified shots.
//!
//! Confidence is the mean of a hoop-proximity score and a trajectory
//! completeness score. What to do with low scores (flagging for review,
//! hiding from charts) is left to consumers.

use crate::outcome::Classification;

/// Component scores behind a shot's confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBreakdown {
    /// `max(0, 1 - min_distance / threshold)`.
    pub proximity_score: f64,
    /// `min(1, trajectory_len / full_length)`.
    pub length_score: f64,
    /// Mean of the two, in `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    proximity_threshold: f64,
    full_length: usize,
}

impl ConfidenceScorer {
    /// `full_length` is the trajectory length that earns a full length score.
    pub fn new(proximity_threshold: f64, full_length: usize) -> Self {
        Self {
            proximity_threshold,
            full_length: full_length.max(1),
        }
    }

    pub fn score(&self, classification: &Classification, trajectory_len: usize) -> ConfidenceBreakdown {
        let min_distance = classification.proximity.min_distance;

        let proximity_score = if self.proximity_threshold > 0.0 {
            (1.0 - min_distance / self.proximity_threshold).max(0.0)
        } else if min_distance <= 0.0 {
            1.0
        } else {
            0.0
        };
        let length_score = (trajectory_len as f64 / self.full_length as f64).min(1.0);
        let confidence = ((proximity_score + length_score) / 2.0).clamp(0.0, 1.0);

        ConfidenceBreakdown {
            proximity_score,
            length_score,
            confidence,
        }
    }
}
