//! Run shot analysis on one or more sessions.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use courtvision_common::config::AppConfig;
use courtvision_engine::{EngineConfig, ScanProgress, ShotEngine};
use courtvision_model::session::{AnalysisReport, LoadedSession};

use super::resolve_session;

/// Command-line overrides for the configured analysis defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOverrides {
    pub video_fps: Option<f64>,
    pub aim_alignment_threshold: Option<f64>,
    pub proximity_threshold: Option<f64>,
    pub min_detection_confidence: Option<f64>,
    pub max_window_len: Option<usize>,
    pub hot_zone_min_attempts: Option<usize>,
}

impl AnalysisOverrides {
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(v) = self.video_fps {
            config.video_fps = v;
        }
        if let Some(v) = self.aim_alignment_threshold {
            config.aim_alignment_threshold = v;
        }
        if let Some(v) = self.proximity_threshold {
            config.proximity_threshold = v;
        }
        if let Some(v) = self.min_detection_confidence {
            config.min_detection_confidence = v;
        }
        if let Some(v) = self.max_window_len {
            config.max_window_len = v;
        }
        if let Some(v) = self.hot_zone_min_attempts {
            config.hot_zone_min_attempts = v;
        }
        config
    }
}

pub async fn run(
    sessions: Vec<PathBuf>,
    overrides: AnalysisOverrides,
    budget_secs: Option<f64>,
) -> anyhow::Result<()> {
    let app_config = AppConfig::load();
    let engine = Arc::new(ShotEngine::new(
        overrides.apply(EngineConfig::from(&app_config.analysis)),
    ));
    let cancel = Arc::new(AtomicBool::new(false));

    if let Some(secs) = budget_secs {
        let budget = Duration::try_from_secs_f64(secs)
            .map_err(|e| anyhow::anyhow!("Invalid budget {secs}s: {e}"))?;
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            tokio::time::sleep(budget).await;
            tracing::warn!(budget_secs = secs, "Analysis budget exhausted, cancelling");
            cancel.store(true, Ordering::Relaxed);
        });
    }

    println!("Analyzing {} session(s)...", sessions.len());

    let tasks: Vec<_> = sessions
        .iter()
        .map(|arg| {
            let path = resolve_session(arg, &app_config.sessions_dir);
            let engine = Arc::clone(&engine);
            let cancel = Arc::clone(&cancel);
            let handle =
                tokio::task::spawn_blocking(move || analyze_session(&path, &engine, &cancel));
            (arg.clone(), handle)
        })
        .collect();

    let total = tasks.len();
    let mut failures = 0;
    for (arg, handle) in tasks {
        let result = handle
            .await
            .map_err(|e| anyhow::anyhow!("Analysis task panicked: {e}"))
            .and_then(|r| r);

        match result {
            Ok((report, report_path)) => print_report(&report, &report_path),
            Err(e) => {
                failures += 1;
                println!("\n{}: FAILED", arg.display());
                println!("  {e:#}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {total} session(s) failed");
    }

    println!("\nAnalysis complete.");
    Ok(())
}

fn analyze_session(
    path: &Path,
    engine: &ShotEngine,
    cancel: &AtomicBool,
) -> anyhow::Result<(AnalysisReport, PathBuf)> {
    let mut session = LoadedSession::load(path)
        .with_context(|| format!("Failed to load session {}", path.display()))?;

    tracing::info!(
        session = %session.name,
        positions = session.positions.len(),
        "Starting shot analysis"
    );

    let mut observer = |progress: &ScanProgress| {
        tracing::trace!(
            session = %session.name,
            progress = progress.fraction(),
            shots = progress.shots_detected,
            "Scan progress"
        );
        if cancel.load(Ordering::Relaxed) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };

    let analysis = engine
        .analyze_with_observer(&session.positions, &session.calibration, &mut observer)
        .with_context(|| format!("Shot analysis failed for {}", session.name))?;

    let report = AnalysisReport::new(session.name.clone(), analysis.shots, analysis.summary);
    let report_path = session
        .save_report(report.clone())
        .context("Failed to save analysis report")?;

    Ok((report, report_path))
}

fn print_report(report: &AnalysisReport, report_path: &Path) {
    let s = &report.summary;
    println!("\n{}:", report.session);
    println!(
        "  Shots: {} ({} made, {} missed, {} unknown)",
        s.total_shots, s.makes, s.misses, s.unknown
    );
    println!("  FG: {:.1}%", s.field_goal_percentage);
    println!(
        "  3PT: {}/{} ({:.1}%)",
        s.three_point_makes, s.three_point_attempts, s.three_point_percentage
    );
    if let Some(zone) = s.hot_zone {
        println!("  Hot zone: {zone}");
    }
    if s.limited_ball_visibility() {
        println!("  Warning: limited ball visibility, statistics may be unreliable");
    }
    if s.was_cancelled() {
        println!("  Warning: analysis cancelled, results are partial");
    }
    println!("  Report saved to: {}", report_path.display());
}
