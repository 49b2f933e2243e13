//! Ball position observations produced by the tracker.
//!
//! Positions are recorded in JSONL format, one observation per line.
//! Missed detections are absent frames, never zero-confidence entries.

use serde::{Deserialize, Serialize};

use crate::court::Point2D;

/// Frame index within the source video.
pub type FrameIndex = u64;

/// A single tracked ball observation.
///
/// Before normalization `x`/`y` are camera pixels; afterwards they are
/// court coordinates in `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Frame index in the source video.
    pub frame: FrameIndex,

    pub x: f64,
    pub y: f64,

    /// Detection confidence in `[0.0, 1.0]`.
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl Position {
    pub fn new(frame: FrameIndex, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            frame,
            x,
            y,
            confidence,
        }
    }

    /// Position as a 2D point.
    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Copy of this observation moved to new coordinates.
    pub fn with_coords(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Frame time in seconds for a given frame rate.
    pub fn timestamp_secs(&self, fps: f64) -> f64 {
        if fps <= 0.0 {
            return 0.0;
        }
        self.frame as f64 / fps
    }
}

/// Whether frame numbers are strictly increasing across the slice.
pub fn is_strictly_ordered(positions: &[Position]) -> bool {
    positions.windows(2).all(|w| w[0].frame < w[1].frame)
}

/// Parse positions from JSONL content (one JSON object per line).
pub fn parse_positions(jsonl: &str) -> Result<Vec<Position>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize positions to JSONL format.
pub fn serialize_positions(positions: &[Position]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for position in positions {
        output.push_str(&serde_json::to_string(position)?);
        output.push('\n');
    }
    Ok(output)
}
