//! Show session information.

use std::path::PathBuf;

use courtvision_common::config::AppConfig;
use courtvision_model::court::CourtTransform;
use courtvision_model::session::LoadedSession;

use super::resolve_session;

pub fn run(session: PathBuf) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let path = resolve_session(&session, &config.sessions_dir);
    let session = LoadedSession::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load session: {e}"))?;

    println!("Session: {}", session.name);
    println!("  Path: {}", session.root.display());
    println!();

    println!("Tracking:");
    println!("  Ball positions: {}", session.positions.len());
    if let (Some(first), Some(last)) = (session.positions.first(), session.positions.last()) {
        println!("  Frames: {} - {}", first.frame, last.frame);
    }
    println!();

    println!("Calibration:");
    match &session.calibration {
        Some(c) => {
            match &c.transform {
                CourtTransform::Scale {
                    frame_width,
                    frame_height,
                } => println!("  Transform: scale from {frame_width}x{frame_height}"),
                CourtTransform::Homography { .. } => println!("  Transform: homography"),
            }
            println!("  Hoop: ({:.1}, {:.1})", c.hoop.x, c.hoop.y);
        }
        None => println!("  Missing (analysis will fail)"),
    }

    let issues = session.validate();
    if !issues.is_empty() {
        println!();
        println!("Issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
    }
    println!();

    let Some(report) = &session.report else {
        println!("Not analyzed yet. Run `courtvision analyze {}`.", path.display());
        return Ok(());
    };

    let s = &report.summary;
    println!("Analysis ({}):", report.analyzed_at);
    println!(
        "  Shots: {} ({} made, {} missed, {} unknown)",
        s.total_shots, s.makes, s.misses, s.unknown
    );
    println!("  FG: {:.1}%", s.field_goal_percentage);
    println!(
        "  3PT: {}/{} ({:.1}%)",
        s.three_point_makes, s.three_point_attempts, s.three_point_percentage
    );
    match s.hot_zone {
        Some(zone) => println!("  Hot zone: {zone}"),
        None => println!("  Hot zone: none (too few attempts)"),
    }
    for warning in &s.warnings {
        println!("  Warning: {warning:?}");
    }
    println!();

    println!("Zones:");
    for zone in s.zones.iter().filter(|z| z.attempts > 0) {
        println!(
            "  {:<14} {:>3}/{:<3} {:>5.1}%",
            zone.name, zone.makes, zone.attempts, zone.percentage
        );
    }

    let review_threshold = config.analysis.review_threshold;
    let flagged: Vec<_> = report
        .shots
        .iter()
        .filter(|shot| shot.needs_review(review_threshold))
        .collect();
    if !flagged.is_empty() {
        println!();
        println!("Needs review (confidence < {review_threshold}):");
        for shot in flagged {
            println!(
                "  #{} at {:.1}s: {} from {} ({:.2})",
                shot.id,
                shot.timestamp_secs,
                shot.outcome.as_str(),
                shot.zone,
                shot.confidence
            );
        }
    }

    Ok(())
}
