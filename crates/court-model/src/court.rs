//! Court geometry and calibration types.
//!
//! Normalized court space is `[0.0, 100.0]` on both axes. The hoop end of
//! the court is at the top (`y` near zero); `y` grows toward half court.

use serde::{Deserialize, Serialize};

/// Lower bound of normalized court space on either axis.
pub const COURT_MIN: f64 = 0.0;

/// Upper bound of normalized court space on either axis.
pub const COURT_MAX: f64 = 100.0;

/// A 2D point in normalized court space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Whether the point lies inside normalized court space (edges included).
    pub fn in_court_bounds(&self) -> bool {
        (COURT_MIN..=COURT_MAX).contains(&self.x) && (COURT_MIN..=COURT_MAX).contains(&self.y)
    }
}

/// Location of the hoop in normalized court space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopLocation {
    pub x: f64,
    pub y: f64,
}

impl HoopLocation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Mapping from camera pixel space to normalized court space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CourtTransform {
    /// Linear scaling of the full frame onto the court.
    Scale {
        /// Frame width in pixels.
        frame_width: f64,
        /// Frame height in pixels.
        frame_height: f64,
    },

    /// Projective transform, row-major, mapping `[px, py, 1]` to court space.
    Homography { matrix: [[f64; 3]; 3] },
}

impl CourtTransform {
    /// Plain 1080p scaling.
    pub fn full_hd() -> Self {
        Self::Scale {
            frame_width: 1920.0,
            frame_height: 1080.0,
        }
    }
}

/// Per-video calibration supplied before shot detection begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub transform: CourtTransform,
    pub hoop: HoopLocation,
}

impl Calibration {
    pub fn new(transform: CourtTransform, hoop: HoopLocation) -> Self {
        Self { transform, hoop }
    }

    /// Parse a calibration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
