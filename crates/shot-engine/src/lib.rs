//! CourtVision Shot Engine
//!
//! Turns a tracked ball position stream into classified shot events:
//! - **Normalize:** Map camera pixels into normalized court space
//! - **Segment:** Scan the stream for candidate shot windows
//! - **Detect:** Accept windows that rise toward the hoop
//! - **Classify:** Decide make, miss, or unknown and score confidence
//! - **Zones:** Tag each shot with the court zone of its release point
//! - **Aggregate:** Fold events into per-zone and overall statistics
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod aggregate;
pub mod attempt;
pub mod confidence;
pub mod config;
pub mod normalize;
pub mod outcome;
pub mod pipeline;
pub mod segment;
pub mod zones;

pub use aggregate::StatisticsAggregator;
pub use attempt::{AttemptDecision, RejectReason, ShotAttemptDetector};
pub use config::EngineConfig;
pub use normalize::{CalibrationSource, CourtNormalizer};
pub use pipeline::{BallTrack, ScanObserver, ScanProgress, ShotAnalysis, ShotEngine};
pub use segment::{ShotWindow, TrajectorySegmenter};
pub use zones::{ZoneLayout, ZoneMapper};
