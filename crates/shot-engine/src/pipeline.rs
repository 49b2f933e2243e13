//! The shot engine: one deterministic, sequential pass per video.
//!
//! # Pipeline
//!
//! 1. **Normalize** raw tracker positions into court space (fails only when
//!    the calibration is missing or degenerate).
//! 2. **Segment** the normalized stream into candidate windows, asking the
//!    attempt detector about each one.
//! 3. **Classify** every accepted window, score its confidence, and map its
//!    release point to a zone.
//! 4. **Aggregate** the events into the summary.
//!
//! Callers can watch progress and cancel between windows through a
//! [`ScanObserver`]. A cancelled pass still returns the events found so
//! far, with a warning in the summary.

use std::ops::ControlFlow;

use courtvision_common::error::CourtVisionResult;
use courtvision_model::court::HoopLocation;
use courtvision_model::position::Position;
use courtvision_model::shot::ShotEvent;
use courtvision_model::stats::{AnalysisSummary, AnalysisWarning};

use crate::aggregate::StatisticsAggregator;
use crate::attempt::{AttemptDecision, ShotAttemptDetector};
use crate::confidence::ConfidenceScorer;
use crate::config::EngineConfig;
use crate::normalize::{CalibrationSource, CourtNormalizer};
use crate::outcome::OutcomeClassifier;
use crate::segment::{ShotWindow, TrajectorySegmenter};
use crate::zones::ZoneMapper;

/// Supplies the tracked ball positions for one video, in frame order.
pub trait BallTrack {
    fn ball_positions(&self) -> &[Position];
}

impl BallTrack for [Position] {
    fn ball_positions(&self) -> &[Position] {
        self
    }
}

impl BallTrack for Vec<Position> {
    fn ball_positions(&self) -> &[Position] {
        self
    }
}

/// Progress snapshot reported after each processed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanProgress {
    /// Positions the scan cursor has moved past.
    pub processed_positions: usize,
    /// Usable positions after normalization.
    pub total_positions: usize,
    /// Candidate windows evaluated so far.
    pub windows_evaluated: usize,
    /// Shots detected so far.
    pub shots_detected: usize,
}

impl ScanProgress {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total_positions == 0 {
            return 1.0;
        }
        (self.processed_positions as f64 / self.total_positions as f64).min(1.0)
    }
}

/// Receives progress after every window; `Break` cancels the pass.
pub trait ScanObserver {
    fn on_window(&mut self, progress: &ScanProgress) -> ControlFlow<()>;
}

impl<F> ScanObserver for F
where
    F: FnMut(&ScanProgress) -> ControlFlow<()>,
{
    fn on_window(&mut self, progress: &ScanProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Shot events and statistics for one video.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotAnalysis {
    /// Events in chronological order of `frame_start`.
    pub shots: Vec<ShotEvent>,
    pub summary: AnalysisSummary,
}

impl ShotAnalysis {
    pub fn was_cancelled(&self) -> bool {
        self.summary.was_cancelled()
    }
}

/// Runs shot analysis for one video at a time. Holds no per-run state, so
/// one engine can serve many videos, including from several threads.
#[derive(Debug, Clone)]
pub struct ShotEngine {
    config: EngineConfig,
}

impl ShotEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a whole video without progress reporting.
    pub fn analyze<T, C>(&self, track: &T, calibration: &C) -> CourtVisionResult<ShotAnalysis>
    where
        T: BallTrack + ?Sized,
        C: CalibrationSource + ?Sized,
    {
        self.analyze_with_observer(track, calibration, &mut |_: &ScanProgress| {
            ControlFlow::Continue(())
        })
    }

    /// Analyze a whole video, reporting progress after every window.
    ///
    /// The only error is a missing or unusable calibration, raised before
    /// any event is produced.
    pub fn analyze_with_observer<T, C, O>(
        &self,
        track: &T,
        calibration: &C,
        observer: &mut O,
    ) -> CourtVisionResult<ShotAnalysis>
    where
        T: BallTrack + ?Sized,
        C: CalibrationSource + ?Sized,
        O: ScanObserver + ?Sized,
    {
        let (normalizer, calibration) = CourtNormalizer::from_source(calibration)?;
        let raw = track.ball_positions();
        let stream = normalizer.normalize_stream(raw, self.config.min_detection_confidence);

        let mut warnings = Vec::new();
        if stream.positions.len() < self.config.min_ball_positions {
            tracing::warn!(
                detected = stream.positions.len(),
                required = self.config.min_ball_positions,
                "Limited ball visibility; statistics will be unreliable"
            );
            warnings.push(AnalysisWarning::InsufficientBallData {
                detected: stream.positions.len(),
                required: self.config.min_ball_positions,
            });
        }

        let (shots, cancelled) = self.detect_shots(&stream.positions, calibration.hoop, observer);
        if let Some(warning) = cancelled {
            warnings.push(warning);
        }

        let summary = StatisticsAggregator::new(self.config.hot_zone_min_attempts)
            .summarize_with_warnings(&shots, warnings);

        tracing::info!(
            raw_positions = raw.len(),
            usable_positions = stream.positions.len(),
            shots = summary.total_shots,
            makes = summary.makes,
            misses = summary.misses,
            unknown = summary.unknown,
            "Shot analysis complete"
        );

        Ok(ShotAnalysis { shots, summary })
    }

    /// Scan already-normalized positions for shots.
    ///
    /// Returns the events and, if the observer cancelled, the warning that
    /// describes how far the scan got.
    pub fn detect_shots<O>(
        &self,
        positions: &[Position],
        hoop: HoopLocation,
        observer: &mut O,
    ) -> (Vec<ShotEvent>, Option<AnalysisWarning>)
    where
        O: ScanObserver + ?Sized,
    {
        let (min_len, max_len) = self.config.window_bounds();
        let detector = ShotAttemptDetector::new(hoop, self.config.aim_alignment_threshold);
        let classifier = OutcomeClassifier::new(hoop, self.config.proximity_threshold);
        let scorer = ConfidenceScorer::new(self.config.proximity_threshold, max_len);
        let zones = ZoneMapper::new(self.config.zones.clone());

        let mut shots: Vec<ShotEvent> = Vec::new();
        let mut windows_evaluated = 0;

        for step in TrajectorySegmenter::new(min_len, max_len).scan(positions, &detector) {
            windows_evaluated += 1;

            match step.decision {
                AttemptDecision::Accepted { alignment } => {
                    let id = shots.len() as u32 + 1;
                    if let Some(event) = self.build_event(
                        id,
                        &step.window,
                        &classifier,
                        &scorer,
                        &zones,
                    ) {
                        tracing::debug!(
                            id,
                            frame_start = event.frame_start,
                            frame_end = event.frame_end,
                            alignment,
                            outcome = event.outcome.as_str(),
                            zone = event.zone.as_str(),
                            confidence = event.confidence,
                            "Shot detected"
                        );
                        shots.push(event);
                    }
                }
                AttemptDecision::Rejected(reason) => {
                    tracing::trace!(
                        start_index = step.window.start_index(),
                        ?reason,
                        "Window rejected"
                    );
                }
            }

            let progress = ScanProgress {
                processed_positions: step.cursor,
                total_positions: positions.len(),
                windows_evaluated,
                shots_detected: shots.len(),
            };

            if observer.on_window(&progress).is_break() {
                tracing::info!(
                    processed = step.cursor,
                    total = positions.len(),
                    shots = shots.len(),
                    "Shot analysis cancelled"
                );
                let warning = AnalysisWarning::Cancelled {
                    processed_positions: step.cursor,
                    total_positions: positions.len(),
                    last_frame: step
                        .cursor
                        .checked_sub(1)
                        .and_then(|i| positions.get(i))
                        .map(|p| p.frame),
                };
                return (shots, Some(warning));
            }
        }

        (shots, None)
    }

    fn build_event(
        &self,
        id: u32,
        window: &ShotWindow<'_>,
        classifier: &OutcomeClassifier,
        scorer: &ConfidenceScorer,
        zones: &ZoneMapper,
    ) -> Option<ShotEvent> {
        let classification = classifier.classify(window)?;
        let confidence = scorer.score(&classification, window.len());
        let first = window.first()?;
        let last = window.last()?;

        Some(ShotEvent {
            id,
            frame_start: first.frame,
            frame_end: last.frame,
            timestamp_secs: first.timestamp_secs(self.config.video_fps),
            release_point: classification.release_point,
            outcome: classification.outcome,
            confidence: confidence.confidence,
            zone: zones.classify(classification.release_point),
            trajectory: window.to_vec(),
        })
    }
}
