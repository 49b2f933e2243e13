//! Make/miss classification for accepted shot windows.

use courtvision_model::court::{HoopLocation, Point2D};
use courtvision_model::position::Position;
use courtvision_model::shot::ShotOutcome;

/// Closest approach of a trajectory to the hoop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoopProximity {
    /// Index of the first position at minimum distance.
    pub closest_idx: usize,
    /// Distance to the hoop at `closest_idx` (normalized units).
    pub min_distance: f64,
}

impl HoopProximity {
    /// Find the closest approach. `None` for an empty trajectory.
    pub fn of(trajectory: &[Position], hoop: &HoopLocation) -> Option<Self> {
        let hoop = hoop.point();
        trajectory
            .iter()
            .map(|p| p.point().distance_to(&hoop))
            .enumerate()
            .fold(None, |best: Option<Self>, (idx, distance)| match best {
                Some(b) if b.min_distance <= distance => Some(b),
                _ => Some(Self {
                    closest_idx: idx,
                    min_distance: distance,
                }),
            })
    }
}

/// Classification of one accepted shot window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub outcome: ShotOutcome,
    pub proximity: HoopProximity,
    /// Ball position at shot initiation.
    pub release_point: Point2D,
}

/// Decides make, miss, or unknown from hoop proximity and post-apex motion.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    hoop: HoopLocation,
    proximity_threshold: f64,
}

impl OutcomeClassifier {
    pub fn new(hoop: HoopLocation, proximity_threshold: f64) -> Self {
        Self {
            hoop,
            proximity_threshold,
        }
    }

    /// Classify a trajectory. `None` only for an empty trajectory.
    ///
    /// - never within the threshold: miss
    /// - closest at the last position: unknown (truncated, result unseen)
    /// - `y` grows right after the closest point (drops through): make
    /// - otherwise: miss
    pub fn classify(&self, trajectory: &[Position]) -> Option<Classification> {
        let proximity = HoopProximity::of(trajectory, &self.hoop)?;
        let idx = proximity.closest_idx;

        let outcome = if proximity.min_distance > self.proximity_threshold {
            ShotOutcome::Miss
        } else if idx + 1 >= trajectory.len() {
            ShotOutcome::Unknown
        } else if trajectory[idx + 1].y > trajectory[idx].y {
            ShotOutcome::Make
        } else {
            ShotOutcome::Miss
        };

        Some(Classification {
            outcome,
            proximity,
            release_point: trajectory[0].point(),
        })
    }
}
