//! craters: crater-in-crater matching pipeline CLI
//!
//! Downloads the source crater databases, matches small craters to the large
//! craters containing them, and re-validates previously produced mappings.

mod cli;
mod correct;
mod download;
mod match_catalogs;
mod progress_bar;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Download(args) => download::run(args, &cli),
        Commands::Match(args) => match_catalogs::run(args, &cli),
        Commands::Correct(args) => correct::run(args, &cli),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
