//! Contour extraction CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use contour::EmbeddingKind;
use contour_cli::{GridFormat, JobConfig, OutputFormat, Overrides};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "contour-cli")]
#[command(about = "Extract iso-contour segments from a grid of scalar samples", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, global = true, default_value = "info", env = "CONTOUR_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract contour segments
    Extract {
        /// Job file (YAML); flags below override its values
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Grid file
        #[arg(short, long)]
        grid: Option<PathBuf>,

        /// Grid file format (default: from extension)
        #[arg(long, value_enum)]
        format: Option<GridFormat>,

        /// Comma-separated levels, in output order
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        levels: Option<Vec<f32>>,

        /// Generate levels at this interval over the data range
        #[arg(short, long)]
        interval: Option<f32>,

        /// planar or elevation
        #[arg(short, long)]
        embedding: Option<EmbeddingKind>,

        /// Drawing units per grid column
        #[arg(long)]
        spacing_x: Option<f32>,

        /// Drawing units per grid row
        #[arg(long)]
        spacing_y: Option<f32>,

        /// Split work across threads
        #[arg(long)]
        parallel: bool,

        /// Chaikin smoothing passes for polyline output
        #[arg(long)]
        smooth: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Print levels generated over a grid's data range
    Levels {
        /// Grid file
        #[arg(short, long)]
        grid: PathBuf,

        /// Grid file format (default: from extension)
        #[arg(long, value_enum)]
        format: Option<GridFormat>,

        /// Level spacing
        #[arg(short, long)]
        interval: f32,
    },

    /// Classify a single cell
    Classify {
        /// Corners clockwise from top-left: tl,tr,br,bl
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        corners: Vec<f32>,

        /// Level to test against
        #[arg(short, long, allow_negative_numbers = true)]
        level: f32,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    match cli.command {
        Commands::Extract {
            job,
            grid,
            format,
            levels,
            interval,
            embedding,
            spacing_x,
            spacing_y,
            parallel,
            smooth,
            output,
        } => {
            let overrides = Overrides {
                grid,
                format,
                levels,
                interval,
                embedding,
                spacing_x,
                spacing_y,
                parallel,
                smoothing_passes: smooth,
                output,
            };
            let config = JobConfig::resolve(job.as_deref(), &overrides)?;
            println!("{}", contour_cli::run_job(&config)?);
        }
        Commands::Levels {
            grid,
            format,
            interval,
        } => {
            let format = format.unwrap_or_else(|| GridFormat::from_path(&grid));
            println!("{}", contour_cli::run_levels(&grid, format, interval)?);
        }
        Commands::Classify { corners, level } => {
            let corners = <[f32; 4]>::try_from(corners)
                .map_err(|c| anyhow::anyhow!("expected 4 corners, got {}", c.len()))?;
            println!("{}", contour_cli::describe_case(corners, level));
        }
    }

    Ok(())
}
