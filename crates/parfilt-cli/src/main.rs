//! parfilt - dual-path image convolution CLI
//!
//! Applies 3x3 convolution filters on an accelerated backend, with a
//! sequential reference path for verification.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use parfilt_compute::Backend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "parfilt")]
#[command(author, version, about = "Dual-path image convolution CLI")]
#[command(long_about = "
Applies 3x3 convolution filters (blur, sharpen, edge) to 8-bit images on an
accelerated backend, with a sequential reference path for verification.

Examples:
  parfilt filter photo.png -o out.png -f blur            # CPU backend
  parfilt filter photo.png -o out.png -f edge --backend wgpu
  parfilt filter photo.png -o out.png -f sharpen --compare
  parfilt backends                                       # List backends
  parfilt samples testdata --width 640 --height 480      # Generate test images
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a convolution filter to an image
    #[command(visible_alias = "f")]
    Filter(FilterArgs),

    /// List compute backends and their availability
    #[command(visible_alias = "b")]
    Backends,

    /// Generate procedural sample images for testing
    Samples(SamplesArgs),
}

#[derive(Args)]
struct FilterArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Filter: blur, sharpen, edge
    #[arg(short, long)]
    filter: String,

    /// Backend: cpu, wgpu
    #[arg(short, long, default_value = "cpu")]
    backend: Backend,

    /// Also run the sequential reference and report divergence
    #[arg(short, long)]
    compare: bool,
}

#[derive(Args)]
struct SamplesArgs {
    /// Output directory for the generated PNGs
    dir: PathBuf,

    /// Image width
    #[arg(long, default_value = "512")]
    width: u32,

    /// Image height
    #[arg(long, default_value = "512")]
    height: u32,

    /// Seed for the noise and scene patterns
    #[arg(long, default_value = "7")]
    seed: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // -v forces debug-level logs; otherwise RUST_LOG decides.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Filter(args) => commands::filter::run(args, cli.verbose),
        Commands::Backends => commands::backends::run(cli.verbose),
        Commands::Samples(args) => commands::samples::run(args, cli.verbose),
    }
}
