use std::ops::ControlFlow;

use courtvision_common::error::CourtVisionError;
use courtvision_engine::{
    AttemptDecision, EngineConfig, RejectReason, ScanProgress, ShotAttemptDetector, ShotEngine,
};
use courtvision_model::court::{Calibration, CourtTransform, HoopLocation};
use courtvision_model::position::Position;
use courtvision_model::shot::{ShotOutcome, ZoneName};
use courtvision_model::stats::AnalysisWarning;
use proptest::prelude::*;

const CLEAR_MAKE: [(f64, f64); 15] = [
    (50.0, 80.0),
    (50.0, 70.0),
    (50.0, 60.0),
    (50.0, 50.0),
    (50.0, 40.0),
    (51.0, 30.0),
    (52.0, 18.0),
    (53.0, 6.0),
    (54.0, 14.0),
    (55.0, 20.0),
    (56.0, 30.0),
    (57.0, 40.0),
    (58.0, 50.0),
    (59.0, 60.0),
    (60.0, 70.0),
];

const SHORT_OF_RIM: [(f64, f64); 15] = [
    (50.0, 97.0),
    (50.0, 91.0),
    (50.0, 85.0),
    (50.0, 79.0),
    (50.0, 73.0),
    (50.0, 67.0),
    (50.0, 61.0),
    (50.0, 55.0),
    (50.0, 58.0),
    (50.0, 62.0),
    (50.0, 66.0),
    (50.0, 70.0),
    (50.0, 74.0),
    (50.0, 78.0),
    (50.0, 82.0),
];

const RIM_OUT: [(f64, f64); 15] = [
    (50.0, 80.0),
    (50.0, 70.0),
    (50.0, 60.0),
    (50.0, 50.0),
    (50.0, 40.0),
    (50.0, 32.0),
    (50.0, 30.0),
    (40.0, 28.0),
    (30.0, 26.0),
    (20.0, 24.0),
    (12.0, 22.0),
    (6.0, 20.0),
    (3.0, 18.0),
    (1.0, 16.0),
    (0.0, 14.0),
];

/// Court units map one-to-one onto "pixels"; the hoop sits at (50, 10).
fn identity_calibration() -> Calibration {
    Calibration::new(
        CourtTransform::Scale {
            frame_width: 100.0,
            frame_height: 100.0,
        },
        HoopLocation::new(50.0, 10.0),
    )
}

fn track(points: &[(f64, f64)], start_frame: u64) -> Vec<Position> {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| Position::new(start_frame + i as u64 * 3, *x, *y, 0.9))
        .collect()
}

fn pass(start_frame: u64) -> Vec<Position> {
    let points: Vec<_> = (0..15).map(|i| (10.0 + 5.0 * i as f64, 60.0)).collect();
    track(&points, start_frame)
}

/// Rising straight at the hoop and cut off ten units below it.
fn truncated(len: usize, start_frame: u64) -> Vec<Position> {
    let top = 20.0 + 5.0 * (len as f64 - 1.0);
    let points: Vec<_> = (0..len).map(|i| (50.0, top - 5.0 * i as f64)).collect();
    track(&points, start_frame)
}

fn game() -> Vec<Position> {
    let mut positions = track(&CLEAR_MAKE, 0);
    positions.extend(pass(100));
    positions.extend(track(&SHORT_OF_RIM, 200));
    positions.extend(track(&RIM_OUT, 300));
    positions.extend(truncated(8, 400));
    positions
}

fn analyze(positions: &[Position]) -> courtvision_engine::ShotAnalysis {
    ShotEngine::with_defaults()
        .analyze(positions, &identity_calibration())
        .expect("identity calibration is valid")
}

#[test]
fn clear_make_is_accepted_and_confident() {
    let analysis = analyze(&track(&CLEAR_MAKE, 0));

    assert_eq!(analysis.shots.len(), 1);
    let shot = &analysis.shots[0];
    assert_eq!(shot.outcome, ShotOutcome::Make);
    assert!(shot.confidence > 0.8);
    assert!((shot.confidence - 11.0 / 12.0).abs() < 1e-9);
    assert_eq!(shot.frame_start, 0);
    assert_eq!(shot.frame_end, 42);
    assert_eq!(shot.zone, ZoneName::TopOfKey);
    assert_eq!(shot.trajectory.len(), 15);
}

#[test]
fn short_of_rim_is_a_low_confidence_miss() {
    let analysis = analyze(&track(&SHORT_OF_RIM, 0));

    assert_eq!(analysis.shots.len(), 1);
    let shot = &analysis.shots[0];
    assert_eq!(shot.outcome, ShotOutcome::Miss);
    // Proximity contributes nothing; only the full length counts.
    assert!(shot.confidence <= 0.5);
    assert!((shot.confidence - 0.5).abs() < 1e-9);
}

#[test]
fn rim_out_without_drop_is_a_miss() {
    let analysis = analyze(&track(&RIM_OUT, 0));

    assert_eq!(analysis.shots.len(), 1);
    assert_eq!(analysis.shots[0].outcome, ShotOutcome::Miss);
    assert!((analysis.shots[0].confidence - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn pass_is_rejected_and_produces_no_event() {
    let positions = pass(0);
    let detector = ShotAttemptDetector::new(HoopLocation::new(50.0, 10.0), 0.6);
    assert_eq!(
        detector.evaluate(&positions),
        AttemptDecision::Rejected(RejectReason::NotRising)
    );

    let analysis = analyze(&positions);
    assert!(analysis.shots.is_empty());
    assert_eq!(analysis.summary.total_shots, 0);
}

#[test]
fn truncated_at_closest_point_is_unknown() {
    let analysis = analyze(&truncated(15, 0));

    assert_eq!(analysis.shots.len(), 1);
    assert_eq!(analysis.shots[0].outcome, ShotOutcome::Unknown);
}

#[test]
fn video_ending_mid_flight_is_unknown() {
    let analysis = analyze(&truncated(7, 0));

    assert_eq!(analysis.shots.len(), 1);
    let shot = &analysis.shots[0];
    assert_eq!(shot.outcome, ShotOutcome::Unknown);
    assert_eq!(shot.trajectory.len(), 7);
}

#[test]
fn game_produces_ordered_events_and_statistics() {
    let analysis = analyze(&game());

    let outcomes: Vec<_> = analysis.shots.iter().map(|s| s.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            ShotOutcome::Make,
            ShotOutcome::Miss,
            ShotOutcome::Miss,
            ShotOutcome::Unknown
        ]
    );
    let starts: Vec<_> = analysis.shots.iter().map(|s| s.frame_start).collect();
    assert_eq!(starts, vec![0, 200, 300, 400]);
    let ids: Vec<_> = analysis.shots.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let summary = &analysis.summary;
    assert_eq!(summary.total_shots, 4);
    assert_eq!(summary.makes, 1);
    assert_eq!(summary.misses, 2);
    assert_eq!(summary.unknown, 1);
    assert!((summary.field_goal_percentage - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.three_point_attempts, 4);
    assert_eq!(summary.hot_zone, Some(ZoneName::TopOfKey));
    assert!(summary.warnings.is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let positions = game();
    let engine = ShotEngine::with_defaults();
    let calibration = identity_calibration();

    let first = engine.analyze(&positions, &calibration).unwrap();
    let second = engine.analyze(&positions, &calibration).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_calibration_halts_before_any_event() {
    let none: Option<Calibration> = None;
    let err = ShotEngine::with_defaults()
        .analyze(&game(), &none)
        .unwrap_err();

    assert!(matches!(err, CourtVisionError::CalibrationMissing { .. }));
    assert!(err.is_fatal());
}

#[test]
fn degenerate_calibration_is_rejected() {
    let calibration = Calibration::new(
        CourtTransform::Scale {
            frame_width: 0.0,
            frame_height: 1080.0,
        },
        HoopLocation::new(50.0, 10.0),
    );
    let err = ShotEngine::with_defaults()
        .analyze(&game(), &calibration)
        .unwrap_err();
    assert!(matches!(err, CourtVisionError::InvalidCalibration { .. }));
}

#[test]
fn pixel_space_input_matches_court_space() {
    let pixels: Vec<_> = game()
        .iter()
        .map(|p| p.with_coords(p.x * 19.2, p.y * 10.8))
        .collect();
    let calibration = Calibration::new(CourtTransform::full_hd(), HoopLocation::new(50.0, 10.0));

    let from_pixels = ShotEngine::with_defaults()
        .analyze(&pixels, &calibration)
        .unwrap();
    let from_court = analyze(&game());

    let outcomes = |a: &courtvision_engine::ShotAnalysis| {
        a.shots
            .iter()
            .map(|s| (s.frame_start, s.outcome, s.zone))
            .collect::<Vec<_>>()
    };
    assert_eq!(outcomes(&from_pixels), outcomes(&from_court));
}

#[test]
fn homography_calibration_maps_into_court_space() {
    // Pixel (x, y) lands on court (x / 10 - 5, y / 10 - 5).
    let calibration = Calibration::new(
        CourtTransform::Homography {
            matrix: [[0.1, 0.0, -5.0], [0.0, 0.1, -5.0], [0.0, 0.0, 1.0]],
        },
        HoopLocation::new(50.0, 10.0),
    );
    let pixels: Vec<_> = track(&CLEAR_MAKE, 0)
        .iter()
        .map(|p| p.with_coords((p.x + 5.0) * 10.0, (p.y + 5.0) * 10.0))
        .collect();

    let analysis = ShotEngine::with_defaults()
        .analyze(&pixels, &calibration)
        .unwrap();
    assert_eq!(analysis.shots.len(), 1);
    assert_eq!(analysis.shots[0].outcome, ShotOutcome::Make);
    assert!((analysis.shots[0].release_point.y - 80.0).abs() < 1e-9);
}

#[test]
fn sparse_tracking_is_flagged() {
    let analysis = analyze(&truncated(7, 0));
    assert!(analysis.summary.warnings.contains(&AnalysisWarning::InsufficientBallData {
        detected: 7,
        required: 10,
    }));
}

#[test]
fn low_confidence_detections_are_ignored() {
    let mut positions = track(&CLEAR_MAKE, 0);
    for p in positions.iter_mut().skip(8) {
        p.confidence = 0.1;
    }
    let config = EngineConfig {
        min_detection_confidence: 0.5,
        ..EngineConfig::default()
    };

    let analysis = ShotEngine::new(config)
        .analyze(&positions, &identity_calibration())
        .unwrap();
    // The drop after the closest point was never seen.
    assert_eq!(analysis.shots.len(), 1);
    assert_eq!(analysis.shots[0].outcome, ShotOutcome::Unknown);
    assert_eq!(analysis.shots[0].trajectory.len(), 8);
}

#[test]
fn duplicate_and_rewound_frames_never_reach_trajectories() {
    let clean = track(&CLEAR_MAKE, 0);
    let mut raw = Vec::new();
    for (i, p) in clean.iter().enumerate() {
        raw.push(*p);
        // Same frame again, somewhere else on court.
        raw.push(p.with_coords(p.x + 30.0, p.y));
        if i > 0 {
            raw.push(Position::new(0, 10.0, 90.0, 0.9));
        }
    }

    let analysis = analyze(&raw);

    assert_eq!(analysis.shots.len(), 1);
    let shot = &analysis.shots[0];
    assert_eq!(shot.outcome, ShotOutcome::Make);
    assert_eq!(shot.trajectory, clean);
    assert!(shot.trajectory.windows(2).all(|w| w[0].frame < w[1].frame));
    assert!(shot.trajectory.iter().all(|p| raw.contains(p)));
    assert_eq!(analysis, analyze(&clean));
}

#[test]
fn tighter_proximity_threshold_turns_rim_out_into_far_miss() {
    let config = EngineConfig {
        proximity_threshold: 10.0,
        ..EngineConfig::default()
    };
    let analysis = ShotEngine::new(config)
        .analyze(&track(&RIM_OUT, 0), &identity_calibration())
        .unwrap();

    assert_eq!(analysis.shots[0].outcome, ShotOutcome::Miss);
    assert!((analysis.shots[0].confidence - 0.5).abs() < 1e-9);
}

#[test]
fn cancelling_keeps_events_found_so_far() {
    let mut windows = 0;
    let mut observer = |progress: &ScanProgress| {
        windows += 1;
        if progress.shots_detected == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };

    let analysis = ShotEngine::with_defaults()
        .analyze_with_observer(&game(), &identity_calibration(), &mut observer)
        .unwrap();

    assert_eq!(analysis.shots.len(), 2);
    assert_eq!(analysis.summary.total_shots, 2);
    assert!(analysis.was_cancelled());
    assert!(windows > 2);
}

fn stream_strategy() -> impl Strategy<Value = Vec<Position>> {
    proptest::collection::vec((1u64..6, 0.0f64..100.0, 0.0f64..100.0), 0..200).prop_map(|steps| {
        let mut frame = 0;
        steps
            .into_iter()
            .map(|(gap, x, y)| {
                frame += gap;
                Position::new(frame, x, y, 1.0)
            })
            .collect()
    })
}

fn descending_runs_strategy() -> impl Strategy<Value = Vec<Position>> {
    // Bursts of steady rises toward the hoop end separated by noise.
    proptest::collection::vec((5usize..20, 20.0f64..80.0, 1.0f64..6.0), 1..10).prop_map(|runs| {
        let mut frame = 0;
        let mut positions = Vec::new();
        for (len, x, step) in runs {
            for i in 0..len {
                frame += 1;
                let y = (95.0 - step * i as f64).max(0.0);
                positions.push(Position::new(frame, x, y, 1.0));
            }
            frame += 10;
        }
        positions
    })
}

fn check_invariants(positions: &[Position]) -> Result<(), TestCaseError> {
    let analysis = analyze(positions);
    let summary = &analysis.summary;

    prop_assert_eq!(summary.total_shots as usize, analysis.shots.len());
    prop_assert_eq!(summary.makes + summary.misses + summary.unknown, summary.total_shots);
    let zone_total: u32 = summary.zones.iter().map(|z| z.attempts).sum();
    prop_assert_eq!(zone_total, summary.total_shots);

    for (i, shot) in analysis.shots.iter().enumerate() {
        prop_assert_eq!(shot.id as usize, i + 1);
        prop_assert!(shot.frame_start <= shot.frame_end);
        prop_assert!((0.0..=1.0).contains(&shot.confidence));
        prop_assert!(shot.trajectory.len() >= 5 && shot.trajectory.len() <= 15);
        prop_assert!(shot.trajectory.windows(2).all(|w| w[0].frame < w[1].frame));
        prop_assert_eq!(shot.trajectory.first().map(|p| p.frame), Some(shot.frame_start));
        prop_assert_eq!(shot.trajectory.last().map(|p| p.frame), Some(shot.frame_end));
        // Identity calibration: kept points are exactly the raw ones.
        for point in &shot.trajectory {
            prop_assert!(positions.contains(point), "frame {} was not in the input", point.frame);
        }
    }
    for pair in analysis.shots.windows(2) {
        prop_assert!(!pair[0].overlaps(&pair[1]));
        prop_assert!(pair[0].frame_end < pair[1].frame_start);
    }

    prop_assert_eq!(&analysis, &analyze(positions));
    Ok(())
}

proptest! {
    #[test]
    fn random_streams_keep_invariants(positions in stream_strategy()) {
        check_invariants(&positions)?;
    }

    #[test]
    fn shot_heavy_streams_keep_invariants(positions in descending_runs_strategy()) {
        check_invariants(&positions)?;
    }
}
