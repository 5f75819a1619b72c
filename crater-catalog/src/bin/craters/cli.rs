//! CLI argument definitions for craters

use clap::{Parser, Subcommand, ValueEnum};
use crater_catalog::io::DEFAULT_MAX_CHILD_DIAMETER_KM;
use crater_catalog::matching::DEFAULT_PROGRESS_INTERVAL;
use crater_core::constants::MOON_MEAN_RADIUS_KM;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "craters")]
#[command(about = "Find small craters that lie inside larger craters")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the source crater databases
    Download(DownloadArgs),

    /// Match child craters to the parent craters containing them
    Match(MatchArgs),

    /// Re-validate an existing mapping against parent radii
    Correct(CorrectArgs),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceCatalog {
    /// Robbins (2018) lunar crater database
    Robbins,
    /// Yang et al. aged lunar crater database
    Yang,
    /// Both databases
    All,
}

#[derive(Parser)]
pub struct DownloadArgs {
    /// Output directory for downloaded .csv files
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Which database to fetch
    #[arg(long, value_enum, default_value = "all")]
    pub catalog: SourceCatalog,

    /// Retry failed downloads up to N times
    #[arg(long, default_value = "3")]
    pub retries: u32,

    /// Download even if the file already exists
    #[arg(long)]
    pub force: bool,
}

/// Catalog inputs shared by `match` and `correct`.
#[derive(Parser)]
pub struct CatalogArgs {
    /// Child crater CSV (Robbins column layout)
    #[arg(long)]
    pub children: PathBuf,

    /// Parent crater CSV (Yang column layout)
    #[arg(long)]
    pub parents: PathBuf,

    /// Keep only child craters smaller than this diameter, in km
    #[arg(long, default_value_t = DEFAULT_MAX_CHILD_DIAMETER_KM)]
    pub max_child_diameter: f64,

    /// Mean radius of the body, in km
    #[arg(long, default_value_t = MOON_MEAN_RADIUS_KM)]
    pub radius: f64,
}

#[derive(Parser)]
pub struct MatchArgs {
    #[command(flatten)]
    pub catalogs: CatalogArgs,

    /// Directory for the CSV, JSON and checkpoint outputs
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Base name of the output files
    #[arg(long, default_value = "robbins_in_yang")]
    pub name: String,

    /// Number of threads for parallel matching (1 = sequential, 0 = all cores)
    #[arg(short, long, default_value = "1")]
    pub threads: usize,

    /// Report progress every N child craters
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: usize,

    /// Log progress lines instead of drawing a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Keep the raw checkpoint after the outputs are written
    #[arg(long)]
    pub keep_checkpoint: bool,
}

#[derive(Parser)]
pub struct CorrectArgs {
    #[command(flatten)]
    pub catalogs: CatalogArgs,

    /// Mapping JSON to correct
    #[arg(long)]
    pub mapping: PathBuf,

    /// Corrected mapping JSON
    #[arg(long)]
    pub output: PathBuf,

    /// Also write the corrected mapping as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
