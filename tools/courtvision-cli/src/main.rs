//! CourtVision CLI: batch shot analysis over session directories.
//!
//! Usage:
//!   courtvision analyze <SESSION>...   Detect and classify shots
//!   courtvision info <SESSION>         Show session and analysis summary
//!   courtvision export <SESSION>       Export the shot list as JSON or CSV

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "courtvision",
    about = "Basketball shot detection and shooting statistics",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect shots in one or more sessions and write analysis.json
    Analyze {
        /// Session directories (or names under the configured sessions dir)
        #[arg(required = true)]
        sessions: Vec<PathBuf>,

        /// Source video frame rate, used for shot timestamps
        #[arg(long)]
        fps: Option<f64>,

        /// Minimum aim alignment (dot product) for a shot attempt
        #[arg(long)]
        alignment: Option<f64>,

        /// Hoop proximity threshold (normalized court units)
        #[arg(long)]
        proximity: Option<f64>,

        /// Ignore ball detections below this confidence
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Maximum positions per candidate shot window
        #[arg(long)]
        max_window: Option<usize>,

        /// Minimum attempts for a zone to be the hot zone
        #[arg(long)]
        hot_zone_min: Option<usize>,

        /// Stop analysis after this many seconds and keep partial results
        #[arg(long)]
        budget_secs: Option<f64>,
    },

    /// Show session information and the latest analysis
    Info {
        /// Session directory
        session: PathBuf,
    },

    /// Export the analyzed shot list
    Export {
        /// Session directory
        session: PathBuf,

        /// Output format: json|csv
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = courtvision_common::config::AppConfig::load().logging;
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.json_logs {
        logging.json = true;
    }
    courtvision_common::logging::init_logging(&logging)?;

    match cli.command {
        Commands::Analyze {
            sessions,
            fps,
            alignment,
            proximity,
            min_confidence,
            max_window,
            hot_zone_min,
            budget_secs,
        } => {
            let overrides = commands::analyze::AnalysisOverrides {
                video_fps: fps,
                aim_alignment_threshold: alignment,
                proximity_threshold: proximity,
                min_detection_confidence: min_confidence,
                max_window_len: max_window,
                hot_zone_min_attempts: hot_zone_min,
            };
            commands::analyze::run(sessions, overrides, budget_secs).await
        }
        Commands::Info { session } => commands::info::run(session),
        Commands::Export {
            session,
            format,
            output,
        } => commands::export::run(session, format, output),
    }
}
