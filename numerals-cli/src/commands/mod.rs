//! Command implementations for the CLI

use anyhow::Result;
use clap::Subcommand;

pub mod detect;
pub mod validate;

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect numbers in a pre-tokenized stream
    Detect(detect::DetectArgs),

    /// Validate lexicon and unit vocabulary files
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Detect(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}
