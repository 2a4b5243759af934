//! imv - batch front end for the imv viewer core
//!
//! Drives the same edit session and viewport transform the interactive
//! viewer uses, over raw RGBA8 files.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "imv")]
#[command(author, version, about = "Image viewer core: adjustments and view math")]
#[command(long_about = "
Runs imv's colour adjustment session and viewport math without a window.
Images are raw interleaved RGBA8 (width * height * 4 bytes, row-major).

Examples:
  imv adjust in.rgba -W 640 -H 480 -o out.rgba --brightness 0.2
  imv adjust in.rgba -W 640 -H 480 -o out.rgba --preset warm.ron --gamma 1.4
  imv adjust in.rgba -W 640 -H 480 -o out.rgba --mirror --scale 0.5
  imv fit --image 1920x1080 --viewport 800x600
  imv fit --image 1920x1080 --viewport 800x600 --zoom 3 --anchor 100,100
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply brightness/contrast/saturation/gamma to a raw RGBA8 image
    #[command(visible_alias = "a")]
    Adjust(AdjustArgs),

    /// Print the view transform for an image in a viewport
    Fit(FitArgs),
}

#[derive(Args)]
struct AdjustArgs {
    /// Input raw RGBA8 file
    input: PathBuf,

    /// Output raw RGBA8 file
    #[arg(short, long)]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// RON preset with any of brightness/contrast/saturation/gamma
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Brightness (-1..1)
    #[arg(short, long, allow_hyphen_values = true)]
    brightness: Option<String>,

    /// Contrast (-1..1)
    #[arg(short, long, allow_hyphen_values = true)]
    contrast: Option<String>,

    /// Saturation (0..2)
    #[arg(short, long)]
    saturation: Option<String>,

    /// Gamma (> 0)
    #[arg(short, long, allow_hyphen_values = true)]
    gamma: Option<String>,

    /// Mirror left-right before adjusting
    #[arg(long)]
    mirror: bool,

    /// Scale factor applied before adjusting
    #[arg(long)]
    scale: Option<f64>,

    /// Resize filter: nearest, bilinear
    #[arg(short, long, default_value = "bilinear")]
    filter: String,
}

#[derive(Args)]
struct FitArgs {
    /// Image size, WxH
    #[arg(long)]
    image: String,

    /// Viewport size, WxH
    #[arg(long)]
    viewport: String,

    /// Wheel notches to zoom after fitting (fractional allowed)
    #[arg(short, long, allow_hyphen_values = true)]
    zoom: Option<f32>,

    /// Zoom anchor X,Y in screen pixels (default: viewport centre)
    #[arg(short, long)]
    anchor: Option<String>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Adjust(args) => commands::adjust::run(args, cli.verbose),
        Commands::Fit(args) => commands::fit::run(args, cli.verbose),
    }
}
