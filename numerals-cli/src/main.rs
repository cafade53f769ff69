use anyhow::Result;
use clap::Parser;
use numerals_cli::commands::Commands;

/// Recognize numbers in pre-tokenized text
#[derive(Debug, Parser)]
#[command(name = "numerals", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}
