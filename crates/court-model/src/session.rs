//! On-disk analysis sessions.
//!
//! A session is a directory holding one video's tracker output and
//! calibration, plus the analysis report once one has been produced:
//!
//! ```text
//! <session>/
//!   positions.jsonl    raw ball positions, one JSON object per line
//!   calibration.json   court transform and hoop location
//!   analysis.json      written by `courtvision analyze`
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::court::Calibration;
use crate::position::{is_strictly_ordered, parse_positions, serialize_positions, Position};
use crate::shot::ShotEvent;
use crate::stats::AnalysisSummary;

pub const POSITIONS_FILE: &str = "positions.jsonl";
pub const CALIBRATION_FILE: &str = "calibration.json";
pub const REPORT_FILE: &str = "analysis.json";

/// Shot events and statistics produced for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Report format version.
    pub version: String,

    /// Session name (the directory name).
    pub session: String,

    /// When the analysis ran (RFC 3339).
    pub analyzed_at: String,

    pub shots: Vec<ShotEvent>,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    pub fn new(session: impl Into<String>, shots: Vec<ShotEvent>, summary: AnalysisSummary) -> Self {
        Self {
            version: "1.0".to_string(),
            session: session.into(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            shots,
            summary,
        }
    }
}

/// The complete in-memory representation of a loaded session.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    /// Filesystem path to the session directory.
    pub root: PathBuf,

    /// Session name, taken from the directory name.
    pub name: String,

    /// Raw tracker positions in file order.
    pub positions: Vec<Position>,

    /// `None` when the session has no calibration file.
    pub calibration: Option<Calibration>,

    /// Previously saved analysis, if any.
    pub report: Option<AnalysisReport>,
}

impl LoadedSession {
    /// Load a session from a directory.
    ///
    /// Only the positions file is required. A missing calibration is not an
    /// error here; analysis decides what to do about it.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, SessionError> {
        let root = root.as_ref().to_path_buf();

        let positions_path = root.join(POSITIONS_FILE);
        let content =
            std::fs::read_to_string(&positions_path).map_err(|e| SessionError::IoError {
                path: positions_path.clone(),
                source: e,
            })?;
        let positions = parse_positions(&content).map_err(|e| SessionError::ParseError {
            path: positions_path,
            source: e,
        })?;

        let calibration = read_optional(&root.join(CALIBRATION_FILE), Calibration::from_json)?;
        let report = read_optional(&root.join(REPORT_FILE), |json| serde_json::from_str(json))?;

        Ok(Self {
            name: session_name(&root),
            root,
            positions,
            calibration,
            report,
        })
    }

    /// Create a new session on disk from positions and an optional calibration.
    pub fn create(
        root: impl AsRef<Path>,
        positions: Vec<Position>,
        calibration: Option<Calibration>,
    ) -> Result<Self, SessionError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| SessionError::IoError {
            path: root.clone(),
            source: e,
        })?;

        let positions_path = root.join(POSITIONS_FILE);
        let jsonl = serialize_positions(&positions).map_err(|e| SessionError::ParseError {
            path: positions_path.clone(),
            source: e,
        })?;
        write_file(&positions_path, jsonl)?;

        if let Some(ref calibration) = calibration {
            write_json(&root.join(CALIBRATION_FILE), calibration)?;
        }

        Ok(Self {
            name: session_name(&root),
            root,
            positions,
            calibration,
            report: None,
        })
    }

    /// Store a report and write it to `analysis.json`.
    pub fn save_report(&mut self, report: AnalysisReport) -> Result<PathBuf, SessionError> {
        let path = self.report_path();
        write_json(&path, &report)?;
        self.report = Some(report);
        Ok(path)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE)
    }

    /// Problems that would make analysis fail or mislead.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        if self.calibration.is_none() {
            errors.push(format!("Calibration missing: {CALIBRATION_FILE}"));
        }
        if self.positions.is_empty() {
            errors.push(format!("No ball positions in {POSITIONS_FILE}"));
        }
        if !is_strictly_ordered(&self.positions) {
            errors.push(format!(
                "Positions out of order in {POSITIONS_FILE}: frame numbers must strictly increase"
            ));
        }
        if let Some(p) = self
            .positions
            .iter()
            .find(|p| !(0.0..=1.0).contains(&p.confidence))
        {
            errors.push(format!(
                "Confidence {} at frame {} is outside [0, 1]",
                p.confidence, p.frame
            ));
        }

        errors
    }
}

/// Errors that can occur when working with sessions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn session_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

fn read_optional<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<Option<T>, SessionError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| SessionError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
        .map(Some)
        .map_err(|e| SessionError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SessionError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_file(path, json)
}

fn write_file(path: &Path, content: String) -> Result<(), SessionError> {
    std::fs::write(path, content).map_err(|e| SessionError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}
