//! Kingmaker CLI - map bootstrap and inspection
//!
//! Commands:
//! - config: Write the built-in Kingmaker grid config
//! - grid: Generate a capital-centric grid and report it
//! - field: Generate a flat-top rectangular field and its prism mesh
//! - walk: Simulate party movement on a generated grid

mod field_cmd;
mod grid_cmd;
mod walk_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kingmaker_core::GridConfig;

#[derive(Parser)]
#[command(name = "kingmaker")]
#[command(about = "Kingmaker hex map engine")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in grid config as JSON
    Config {
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Rings around the capital
        #[arg(long, default_value = "1")]
        radius: u32,
    },
    /// Generate a capital-centric grid
    Grid(grid_cmd::GridArgs),
    /// Generate a flat-top rectangular field
    Field(field_cmd::FieldArgs),
    /// Simulate party movement
    Walk(walk_cmd::WalkArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Config { output, radius } => write_config(&output, radius),
        Commands::Grid(args) => grid_cmd::run(args),
        Commands::Field(args) => field_cmd::run(args),
        Commands::Walk(args) => walk_cmd::run(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn write_config(output: &PathBuf, radius: u32) -> Result<()> {
    let config = GridConfig::kingmaker().with_radius(radius);
    config.validate()?;
    config
        .save(output)
        .with_context(|| format!("Failed to write config: {}", output.display()))?;
    tracing::info!("Saved grid config to {}", output.display());
    Ok(())
}

/// Load a config file, or the built-in one, then apply CLI overrides
pub(crate) fn load_config(
    path: Option<&PathBuf>,
    radius: Option<u32>,
    size: Option<f32>,
) -> Result<GridConfig> {
    let mut config = match path {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GridConfig::kingmaker(),
    };
    if let Some(radius) = radius {
        config.radius = radius;
    }
    if let Some(size) = size {
        config.hex_size = size;
    }
    Ok(config)
}
