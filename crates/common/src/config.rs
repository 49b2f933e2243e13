//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where analysis sessions are stored.
    pub sessions_dir: PathBuf,

    /// Default shot-analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default shot-analysis parameters.
///
/// The alignment and proximity thresholds are empirical and have not been
/// validated against labelled footage; treat them as tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Frame rate of the source video, used to timestamp shots.
    pub video_fps: f64,

    /// Minimum number of positions in a candidate shot window.
    pub min_window_len: usize,

    /// Maximum number of positions in a candidate shot window.
    pub max_window_len: usize,

    /// Minimum dot product between the early flight direction and the
    /// direction to the hoop for a window to count as aimed.
    pub aim_alignment_threshold: f64,

    /// Distance (normalized court units) within which the ball is close
    /// enough to the hoop for a make to be possible.
    pub proximity_threshold: f64,

    /// Fewer ball positions than this across a video triggers a
    /// limited-visibility warning.
    pub min_ball_positions: usize,

    /// Positions with lower detection confidence are ignored.
    pub min_detection_confidence: f64,

    /// Confidence below which a shot should be flagged for human review.
    pub review_threshold: f64,

    /// Minimum attempts for a zone to be considered as the hot zone.
    pub hot_zone_min_attempts: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "courtvision_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sessions_dir: dirs_default_sessions(),
            analysis: AnalysisDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            video_fps: 30.0,
            min_window_len: 5,
            max_window_len: 15,
            aim_alignment_threshold: 0.6,
            proximity_threshold: 30.0,
            min_ball_positions: 10,
            min_detection_confidence: 0.0,
            review_threshold: 0.5,
            hot_zone_min_attempts: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("courtvision").join("config.json")
}

/// Default sessions directory.
fn dirs_default_sessions() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("courtvision").join("sessions")
}
