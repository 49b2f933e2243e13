//! Shooting statistics derived from shot events.
//!
//! These records are always recomputed from the full event list; nothing
//! here is updated incrementally.

use serde::{Deserialize, Serialize};

use crate::position::FrameIndex;
use crate::shot::ZoneName;

/// Attempts and makes for one court zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
    pub zone: ZoneName,

    /// Display label of the zone.
    pub name: String,

    pub attempts: u32,
    pub makes: u32,

    /// `makes / attempts * 100`, or 0 when there are no attempts.
    pub percentage: f64,
}

/// Non-fatal conditions attached to an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// Too few ball positions to present confident statistics.
    InsufficientBallData { detected: usize, required: usize },

    /// The caller stopped the scan early; statistics cover a prefix.
    Cancelled {
        processed_positions: usize,
        total_positions: usize,
        last_frame: Option<FrameIndex>,
    },
}

/// The canonical statistics payload for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_shots: u32,
    pub makes: u32,
    pub misses: u32,
    pub unknown: u32,

    /// `makes / (makes + misses) * 100`, or 0 without classified attempts.
    pub field_goal_percentage: f64,

    pub three_point_attempts: u32,
    pub three_point_makes: u32,
    pub three_point_percentage: f64,

    /// Best-shooting zone among zones with enough attempts.
    pub hot_zone: Option<ZoneName>,

    /// One entry per zone, in canonical order.
    pub zones: Vec<ZoneStats>,

    #[serde(default)]
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisSummary {
    /// Whether the ball was seen too rarely for confident statistics.
    pub fn limited_ball_visibility(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::InsufficientBallData { .. }))
    }

    pub fn was_cancelled(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::Cancelled { .. }))
    }

    /// Stats for a single zone.
    pub fn zone(&self, zone: ZoneName) -> Option<&ZoneStats> {
        self.zones.iter().find(|z| z.zone == zone)
    }
}

/// Percentage with a zero-denominator guard.
pub fn percentage(makes: u32, attempts: u32) -> f64 {
    if attempts == 0 {
        return 0.0;
    }
    makes as f64 / attempts as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_guards_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert!((percentage(1, 4) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_warning_json_format() {
        let warning = AnalysisWarning::InsufficientBallData {
            detected: 4,
            required: 10,
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"kind\":\"insufficient_ball_data\""));
        assert!(json.contains("\"detected\":4"));
    }

    #[test]
    fn test_summary_flags() {
        let summary = AnalysisSummary {
            total_shots: 0,
            makes: 0,
            misses: 0,
            unknown: 0,
            field_goal_percentage: 0.0,
            three_point_attempts: 0,
            three_point_makes: 0,
            three_point_percentage: 0.0,
            hot_zone: None,
            zones: vec![],
            warnings: vec![AnalysisWarning::Cancelled {
                processed_positions: 3,
                total_positions: 40,
                last_frame: Some(3),
            }],
        };
        assert!(summary.was_cancelled());
        assert!(!summary.limited_ball_visibility());
        assert!(summary.zone(ZoneName::Paint).is_none());
    }
}
