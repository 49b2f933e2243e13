//! Export the analyzed shot list.

use std::path::PathBuf;

use courtvision_common::config::AppConfig;
use courtvision_model::session::LoadedSession;
use courtvision_model::shot::ShotEvent;
use serde::Serialize;

use super::resolve_session;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// One CSV row per shot.
#[derive(Debug, Serialize)]
struct ShotRow<'a> {
    id: u32,
    frame_start: u64,
    frame_end: u64,
    timestamp: f64,
    x: f64,
    y: f64,
    outcome: &'a str,
    zone: &'a str,
    confidence: f64,
}

impl<'a> From<&'a ShotEvent> for ShotRow<'a> {
    fn from(shot: &'a ShotEvent) -> Self {
        Self {
            id: shot.id,
            frame_start: shot.frame_start,
            frame_end: shot.frame_end,
            timestamp: shot.timestamp_secs,
            x: shot.release_point.x,
            y: shot.release_point.y,
            outcome: shot.outcome.as_str(),
            zone: shot.zone.as_str(),
            confidence: shot.confidence,
        }
    }
}

pub fn run(session: PathBuf, format: String, output: Option<PathBuf>) -> anyhow::Result<()> {
    let export_format = match format.as_str() {
        "json" => ExportFormat::Json,
        "csv" => ExportFormat::Csv,
        _ => {
            return Err(anyhow::anyhow!("Unknown format: {format}. Use: json, csv"));
        }
    };

    let config = AppConfig::load();
    let path = resolve_session(&session, &config.sessions_dir);
    let session = LoadedSession::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load session: {e}"))?;

    let report = session.report.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "Session {} has no analysis. Run `courtvision analyze` first.",
            session.name
        )
    })?;

    let content = match export_format {
        ExportFormat::Json => serde_json::to_string_pretty(&report.shots)?,
        ExportFormat::Csv => shots_to_csv(&report.shots)?,
    };

    let output_path =
        output.unwrap_or_else(|| path.join(format!("shots.{}", export_format.extension())));
    std::fs::write(&output_path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output_path.display()))?;

    println!(
        "Exported {} shot(s) from {} to {}",
        report.shots.len(),
        session.name,
        output_path.display()
    );
    Ok(())
}

fn shots_to_csv(shots: &[ShotEvent]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for shot in shots {
        writer.serialize(ShotRow::from(shot))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}
