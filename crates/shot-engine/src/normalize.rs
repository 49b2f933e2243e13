//! Camera-to-court coordinate normalization.
//!
//! Applies the per-video calibration transform to raw tracker output and
//! enforces the ingest rules every later stage relies on: finite court
//! coordinates and strictly increasing frame numbers.

use courtvision_common::error::{CourtVisionError, CourtVisionResult};
use courtvision_model::court::{Calibration, CourtTransform, COURT_MAX};
use courtvision_model::position::Position;
use nalgebra::{Matrix3, Vector3};

/// Supplies the calibration for the video under analysis.
pub trait CalibrationSource {
    fn calibration(&self) -> Option<&Calibration>;
}

impl CalibrationSource for Calibration {
    fn calibration(&self) -> Option<&Calibration> {
        Some(self)
    }
}

impl CalibrationSource for Option<Calibration> {
    fn calibration(&self) -> Option<&Calibration> {
        self.as_ref()
    }
}

#[derive(Debug, Clone)]
enum Projection {
    Scale { sx: f64, sy: f64 },
    Homography(Matrix3<f64>),
}

/// Maps camera pixel coordinates into normalized court space.
#[derive(Debug, Clone)]
pub struct CourtNormalizer {
    projection: Projection,
}

/// Counts of raw positions rejected during ingest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DroppedPositions {
    pub low_confidence: usize,
    pub unprojectable: usize,
    pub out_of_order: usize,
}

impl DroppedPositions {
    pub fn total(&self) -> usize {
        self.low_confidence + self.unprojectable + self.out_of_order
    }
}

/// Result of normalizing a whole position stream.
#[derive(Debug, Clone)]
pub struct NormalizedStream {
    pub positions: Vec<Position>,
    pub dropped: DroppedPositions,
}

impl CourtNormalizer {
    /// Build a normalizer for a transform, rejecting degenerate ones.
    pub fn new(transform: &CourtTransform) -> CourtVisionResult<Self> {
        let projection = match transform {
            CourtTransform::Scale {
                frame_width,
                frame_height,
            } => {
                let valid = |v: f64| v.is_finite() && v > 0.0;
                if !valid(*frame_width) || !valid(*frame_height) {
                    return Err(CourtVisionError::invalid_calibration(format!(
                        "frame size must be positive, got {frame_width}x{frame_height}"
                    )));
                }
                Projection::Scale {
                    sx: COURT_MAX / frame_width,
                    sy: COURT_MAX / frame_height,
                }
            }
            CourtTransform::Homography { matrix } => {
                let h = Matrix3::new(
                    matrix[0][0],
                    matrix[0][1],
                    matrix[0][2],
                    matrix[1][0],
                    matrix[1][1],
                    matrix[1][2],
                    matrix[2][0],
                    matrix[2][1],
                    matrix[2][2],
                );
                if h.iter().any(|v| !v.is_finite()) {
                    return Err(CourtVisionError::invalid_calibration(
                        "homography contains non-finite entries",
                    ));
                }
                if h.determinant().abs() < 1e-12 {
                    return Err(CourtVisionError::invalid_calibration(
                        "homography is singular",
                    ));
                }
                Projection::Homography(h)
            }
        };
        Ok(Self { projection })
    }

    /// Resolve the calibration from a source.
    ///
    /// Fails with `CalibrationMissing` when the source has none; the whole
    /// analysis must stop in that case.
    pub fn from_source<C: CalibrationSource + ?Sized>(
        source: &C,
    ) -> CourtVisionResult<(Self, Calibration)> {
        let calibration = source.calibration().ok_or_else(|| {
            CourtVisionError::calibration_missing("no court transform available for this video")
        })?;
        let normalizer = Self::new(&calibration.transform)?;
        Ok((normalizer, calibration.clone()))
    }

    /// Project a pixel coordinate into court space.
    ///
    /// Returns `None` for points the transform sends to infinity.
    pub fn to_court(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        let (x, y) = match &self.projection {
            Projection::Scale { sx, sy } => (px * sx, py * sy),
            Projection::Homography(h) => {
                let p = h * Vector3::new(px, py, 1.0);
                if p[2].abs() < 1e-15 {
                    return None;
                }
                (p[0] / p[2], p[1] / p[2])
            }
        };
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }

    /// Normalize a single raw position. Frame and confidence carry over.
    pub fn normalize(&self, raw: &Position) -> Option<Position> {
        self.to_court(raw.x, raw.y)
            .map(|(x, y)| raw.with_coords(x, y))
    }

    /// Normalize a raw tracker stream.
    ///
    /// Drops positions below `min_confidence`, positions that cannot be
    /// projected, and positions whose frame does not advance past the
    /// previously kept one. Nothing is interpolated or invented.
    pub fn normalize_stream(&self, raw: &[Position], min_confidence: f64) -> NormalizedStream {
        let mut positions = Vec::with_capacity(raw.len());
        let mut dropped = DroppedPositions::default();

        for position in raw {
            if position.confidence < min_confidence {
                dropped.low_confidence += 1;
                continue;
            }

            if let Some(last) = positions.last().map(|p: &Position| p.frame) {
                if position.frame <= last {
                    tracing::debug!(
                        frame = position.frame,
                        previous = last,
                        "Dropping out-of-order ball position"
                    );
                    dropped.out_of_order += 1;
                    continue;
                }
            }

            match self.normalize(position) {
                Some(normalized) => positions.push(normalized),
                None => dropped.unprojectable += 1,
            }
        }

        if dropped.total() > 0 {
            tracing::warn!(
                kept = positions.len(),
                low_confidence = dropped.low_confidence,
                unprojectable = dropped.unprojectable,
                out_of_order = dropped.out_of_order,
                "Dropped ball positions during normalization"
            );
        }

        NormalizedStream { positions, dropped }
    }
}
