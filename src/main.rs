use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use fitstats::error::ErrorSeverity;
use fitstats::export::{self, json, text, ExportFormat};
use fitstats::logging::{init_logging, LogLevel};
use fitstats::window::{parse_date, DateWindow};
use fitstats::{ActivityInput, ActivityStatsEngine, AppConfig, StatsError, StatsResult};

/// fitstats - Activity statistics for nutrition, hydration and workout logs
///
/// Reads an activity bundle (JSON with nutrition, water and workout logs plus
/// the active plans) and derives streaks, adherence scores, month-over-month
/// comparisons and insights for a reference date.
#[derive(Parser)]
#[command(name = "fitstats")]
#[command(version)]
#[command(about = "Activity statistics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full stats result as JSON
    Stats {
        /// Activity bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to the local date
        #[arg(short, long)]
        today: Option<String>,

        /// Evaluate the calculators on the thread pool
        #[arg(short, long)]
        parallel: bool,
    },

    /// Print a readable report in the terminal
    Report {
        /// Activity bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to the local date
        #[arg(short, long)]
        today: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Write the stats result to a file
    Export {
        /// Activity bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to the local date
        #[arg(short, long)]
        today: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (json, csv, text)
        #[arg(short = 'f', long, default_value = "json")]
        format: String,
    },

    /// Show or initialize the configuration file
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load_or_default(cli.config.as_deref());

    let mut log_config = app_config.logging.clone();
    log_config.level = LogLevel::raised_by(log_config.level, cli.verbose);
    init_logging(&log_config).context("Failed to initialize logging")?;

    let engine = ActivityStatsEngine::with_config(app_config.stats.clone());

    match cli.command {
        Commands::Stats {
            input,
            today,
            parallel,
        } => {
            let (window, activity) = load_run(&input, today.as_deref())?;
            let stats = if parallel {
                engine.compute_parallel(&window, &activity)
            } else {
                engine.compute(&window, &activity)
            };
            println!("{}", json::to_json_string(&stats)?);
        }

        Commands::Report {
            input,
            today,
            no_color,
        } => {
            let (window, activity) = load_run(&input, today.as_deref())?;
            let stats = engine.compute(&window, &activity);
            print!("{}", text::render_report(&stats, !no_color));
        }

        Commands::Export {
            input,
            today,
            output,
            format,
        } => {
            let format: ExportFormat = format
                .parse()
                .map_err(|e| user_error(StatsError::Export(e)))?;
            let (window, activity) = load_run(&input, today.as_deref())?;
            let stats: StatsResult = engine.compute(&window, &activity);

            export::export_stats(&stats, format, &output)
                .map_err(|e| user_error(StatsError::Export(e)))?;
            println!(
                "{}",
                format!("✓ Exported stats to {}", output.display()).green()
            );
        }

        Commands::Config { init } => {
            let path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
            if init {
                let mut config = AppConfig::default();
                config.save_to_file(&path)?;
                println!(
                    "{}",
                    format!("✓ Wrote default configuration to {}", path.display()).green()
                );
            } else {
                println!("{}", format!("# {}", path.display()).dimmed());
                print!(
                    "{}",
                    toml::to_string_pretty(&app_config).context("Failed to render configuration")?
                );
            }
        }
    }

    Ok(())
}

/// Resolve the reference date and load the activity bundle
fn load_run(input: &Path, today: Option<&str>) -> Result<(DateWindow, ActivityInput)> {
    let window = match today {
        Some(value) => DateWindow::new(parse_date(value).map_err(user_error)?),
        None => DateWindow::local_today(),
    };

    let activity = ActivityInput::load_json(input).map_err(user_error)?;

    tracing::info!(
        today = %window.today(),
        input = %input.display(),
        "Computing activity stats"
    );

    Ok((window, activity))
}

fn user_error(err: StatsError) -> anyhow::Error {
    match err.severity() {
        ErrorSeverity::Warning => tracing::warn!(error = %err, "Request rejected"),
        ErrorSeverity::Error => tracing::error!(error = %err, "Request failed"),
    }
    anyhow::anyhow!(err.user_message())
}
