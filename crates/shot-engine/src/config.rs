//! Engine configuration.

use courtvision_common::config::AnalysisDefaults;
use serde::{Deserialize, Serialize};

use crate::zones::ZoneLayout;

/// Fewest positions the attempt detector can judge: the rise check looks at
/// five consecutive positions.
pub const MIN_SHOT_POSITIONS: usize = 5;

/// Configuration for a shot-analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Frame rate of the source video, used to timestamp shots.
    pub video_fps: f64,

    /// Minimum positions in a candidate window. Never below
    /// [`MIN_SHOT_POSITIONS`].
    pub min_window_len: usize,

    /// Maximum positions in a candidate window (~1.5s at 10 fps sampling).
    pub max_window_len: usize,

    /// Dot-product cutoff between early flight direction and the direction
    /// to the hoop (0.6 ≈ 53° deviation).
    pub aim_alignment_threshold: f64,

    /// Hoop distance (normalized units) inside which a make is possible.
    pub proximity_threshold: f64,

    /// Below this many usable positions the summary carries a
    /// limited-visibility warning.
    pub min_ball_positions: usize,

    /// Positions with lower detection confidence are dropped on ingest.
    pub min_detection_confidence: f64,

    /// Minimum attempts for a zone to qualify as the hot zone.
    pub hot_zone_min_attempts: usize,

    /// Fixed court zone boundaries.
    pub zones: ZoneLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&AnalysisDefaults::default())
    }
}

impl From<&AnalysisDefaults> for EngineConfig {
    fn from(defaults: &AnalysisDefaults) -> Self {
        Self {
            video_fps: defaults.video_fps,
            min_window_len: defaults.min_window_len,
            max_window_len: defaults.max_window_len,
            aim_alignment_threshold: defaults.aim_alignment_threshold,
            proximity_threshold: defaults.proximity_threshold,
            min_ball_positions: defaults.min_ball_positions,
            min_detection_confidence: defaults.min_detection_confidence,
            hot_zone_min_attempts: defaults.hot_zone_min_attempts,
            zones: ZoneLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Window bounds clamped to something the detector can evaluate.
    pub fn window_bounds(&self) -> (usize, usize) {
        let min = self.min_window_len.max(MIN_SHOT_POSITIONS);
        let max = self.max_window_len.max(min);
        (min, max)
    }
}
