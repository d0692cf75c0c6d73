//! CLI entry point for the shuffled tile solver

use clap::Parser;
use unshuffle::io::cli::{Cli, FileProcessor};

fn main() -> unshuffle::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
