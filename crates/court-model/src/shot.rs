//! Shot events and court zones.

use serde::{Deserialize, Serialize};

use crate::court::Point2D;
use crate::position::{FrameIndex, Position};

/// Result of a detected shot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotOutcome {
    Make,
    Miss,
    /// The trajectory ended before the result could be observed.
    Unknown,
}

impl ShotOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Make => "make",
            Self::Miss => "miss",
            Self::Unknown => "unknown",
        }
    }
}

/// A named region of the court used to group shots.
///
/// Left and right are as seen from the camera, looking at the hoop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneName {
    Paint,
    MidRange,
    CornerLeft,
    CornerRight,
    WingLeft,
    WingRight,
    TopOfKey,
    /// Fallback for release points outside normalized court space.
    OutOfBounds,
}

impl ZoneName {
    /// Every zone, in canonical reporting order.
    pub const ALL: [ZoneName; 8] = [
        ZoneName::Paint,
        ZoneName::MidRange,
        ZoneName::CornerLeft,
        ZoneName::CornerRight,
        ZoneName::WingLeft,
        ZoneName::WingRight,
        ZoneName::TopOfKey,
        ZoneName::OutOfBounds,
    ];

    /// Whether shots from this zone are beyond the three-point line.
    pub fn is_three_point(&self) -> bool {
        matches!(
            self,
            Self::CornerLeft | Self::CornerRight | Self::WingLeft | Self::WingRight | Self::TopOfKey
        )
    }

    /// Machine-readable identifier (matches the serde form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::MidRange => "mid_range",
            Self::CornerLeft => "corner_left",
            Self::CornerRight => "corner_right",
            Self::WingLeft => "wing_left",
            Self::WingRight => "wing_right",
            Self::TopOfKey => "top_of_key",
            Self::OutOfBounds => "out_of_bounds",
        }
    }

    /// Human-readable label for dashboards and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paint => "Paint",
            Self::MidRange => "Mid-Range",
            Self::CornerLeft => "Left Corner",
            Self::CornerRight => "Right Corner",
            Self::WingLeft => "Left Wing",
            Self::WingRight => "Right Wing",
            Self::TopOfKey => "Top of Key",
            Self::OutOfBounds => "Out of Bounds",
        }
    }
}

impl std::fmt::Display for ZoneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A detected and classified shot attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    /// Sequential identifier, starting at 1 in chronological order.
    pub id: u32,

    /// First frame of the shot window.
    pub frame_start: FrameIndex,

    /// Last frame of the shot window.
    pub frame_end: FrameIndex,

    /// Time of `frame_start` in seconds.
    pub timestamp_secs: f64,

    /// Ball position at shot initiation (court coordinates).
    pub release_point: Point2D,

    pub outcome: ShotOutcome,

    /// Classification confidence in `[0.0, 1.0]`.
    pub confidence: f64,

    pub zone: ZoneName,

    /// The positions making up the shot window, in frame order.
    pub trajectory: Vec<Position>,
}

impl ShotEvent {
    /// Whether this event's frame range intersects another's.
    pub fn overlaps(&self, other: &ShotEvent) -> bool {
        self.frame_start <= other.frame_end && other.frame_start <= self.frame_end
    }

    /// Whether the classification should be checked by a human.
    pub fn needs_review(&self, review_threshold: f64) -> bool {
        self.confidence < review_threshold
    }
}
