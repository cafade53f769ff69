//! Validate command implementation

use anyhow::Result;
use clap::Args;
use numerals_core::{ModelStats, NumeralsConfig};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to validate
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Numbers table to validate
    #[arg(long, value_name = "FILE", requires = "variants")]
    pub numbers: Option<PathBuf>,

    /// Variants table to validate
    #[arg(long, value_name = "FILE", requires = "numbers")]
    pub variants: Option<PathBuf>,

    /// Unit vocabulary to validate
    #[arg(long, value_name = "FILE")]
    pub units: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        match self.check() {
            Ok((stats, units)) => {
                println!("✓ Lexicon is valid!");
                println!("  Numbers: {}", stats.numbers);
                println!("  Ordinals: {}", stats.ordinals);
                println!("  Denominators: {}", stats.denominators);
                println!("  Units: {units}");
                Ok(())
            }
            Err(e) => {
                println!("✗ Lexicon is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }

    fn check(&self) -> numerals_core::Result<(ModelStats, usize)> {
        let mut config = match &self.config {
            Some(path) => {
                println!("Validating configuration: {}", path.display());
                NumeralsConfig::from_path(path)?
            }
            None => NumeralsConfig::default(),
        };
        if let (Some(numbers), Some(variants)) = (&self.numbers, &self.variants) {
            println!(
                "Validating lexicon: {}, {}",
                numbers.display(),
                variants.display()
            );
            config.lexicon.numbers = Some(numbers.clone());
            config.lexicon.variants = Some(variants.clone());
        }
        if let Some(units) = &self.units {
            config.units.vocabulary = Some(units.clone());
        }

        let stats = config.load_model()?.stats();
        let units = config.load_units()?.len();
        Ok((stats, units))
    }
}
