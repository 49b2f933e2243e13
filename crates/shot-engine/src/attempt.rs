//! Shot-attempt detection.
//!
//! A candidate window counts as a shot when the ball rises toward the hoop
//! over its first five positions and its early flight direction points at
//! the hoop.

use courtvision_model::court::{HoopLocation, Point2D};
use courtvision_model::position::Position;

use crate::config::MIN_SHOT_POSITIONS;

/// Why a candidate window was not accepted as a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// Fewer positions than the detector can judge.
    TooShort { len: usize },
    /// The ball did not rise steadily over the first five positions.
    NotRising,
    /// Early flight direction deviates too far from the hoop direction.
    NotAimed { alignment: f64 },
    /// The window starts on the hoop itself, so there is no direction to it.
    AtHoop,
}

/// Outcome of evaluating one candidate window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptDecision {
    Accepted { alignment: f64 },
    Rejected(RejectReason),
}

impl AttemptDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Geometric shot-attempt detector.
#[derive(Debug, Clone)]
pub struct ShotAttemptDetector {
    hoop: HoopLocation,
    alignment_threshold: f64,
}

impl ShotAttemptDetector {
    pub fn new(hoop: HoopLocation, alignment_threshold: f64) -> Self {
        Self {
            hoop,
            alignment_threshold,
        }
    }

    /// Decide whether a window is a shot attempt.
    pub fn evaluate(&self, window: &[Position]) -> AttemptDecision {
        if window.len() < MIN_SHOT_POSITIONS {
            return AttemptDecision::Rejected(RejectReason::TooShort { len: window.len() });
        }

        if !Self::is_rising(&window[..MIN_SHOT_POSITIONS]) {
            return AttemptDecision::Rejected(RejectReason::NotRising);
        }

        let origin = window[0].point();
        let Some(to_hoop) = unit_vector(origin, self.hoop.point()) else {
            return AttemptDecision::Rejected(RejectReason::AtHoop);
        };
        // Rising guarantees the fourth position differs from the first.
        let Some(early) = unit_vector(origin, window[3].point()) else {
            return AttemptDecision::Rejected(RejectReason::NotRising);
        };

        let alignment = to_hoop.0 * early.0 + to_hoop.1 * early.1;
        if alignment > self.alignment_threshold {
            AttemptDecision::Accepted { alignment }
        } else {
            AttemptDecision::Rejected(RejectReason::NotAimed { alignment })
        }
    }

    /// Strictly rising toward the hoop end, i.e. `y` strictly decreasing.
    fn is_rising(positions: &[Position]) -> bool {
        positions.windows(2).all(|w| w[1].y < w[0].y)
    }
}

fn unit_vector(from: Point2D, to: Point2D) -> Option<(f64, f64)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let norm = (dx * dx + dy * dy).sqrt();
    if norm < 1e-9 {
        return None;
    }
    Some((dx / norm, dy / norm))
}
