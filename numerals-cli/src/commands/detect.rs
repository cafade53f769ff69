//! Detect command implementation

use anyhow::{Context, Result};
use clap::{ArgAction, Args, ValueEnum};
use numerals_core::{
    DetectorFactory, NumberDetector, NumeralsConfig, Token, UnitRecognizer,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::input::TokenReader;
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

/// Arguments for the detect command
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Token file (`begin<TAB>end<TAB>text` per line), stdin when omitted
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "NUMERALS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Numbers table, overriding the configured lexicon
    #[arg(long, value_name = "FILE", requires = "variants")]
    pub numbers: Option<PathBuf>,

    /// Variants table, overriding the configured lexicon
    #[arg(long, value_name = "FILE", requires = "numbers")]
    pub variants: Option<PathBuf>,

    /// Also recognize units of measure
    #[arg(short, long)]
    pub units: bool,

    /// Suppress all log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One detection per line
    Text,
    /// JSON array
    Json,
}

impl DetectArgs {
    /// Execute the detect command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let config = self.load_config()?;
        let model = config.load_model().context("Failed to load number lexicon")?;
        let factory = DetectorFactory::new(model);
        let units = if self.units {
            let vocabulary = config
                .load_units()
                .context("Failed to load unit vocabulary")?;
            Some(UnitRecognizer::new(vocabulary))
        } else {
            None
        };

        let tokens = match &self.input {
            Some(path) => TokenReader::read_path(path)?,
            None => TokenReader::read_stdin()?,
        };
        log::info!("Processing {} tokens", tokens.len());

        let mut formatter = self.create_formatter()?;
        detect(&factory, units, &tokens, formatter.as_mut())?;
        formatter.finish()
    }

    fn load_config(&self) -> Result<NumeralsConfig> {
        let mut config = match &self.config {
            Some(path) => NumeralsConfig::from_path(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
            None => NumeralsConfig::default(),
        };
        if let (Some(numbers), Some(variants)) = (&self.numbers, &self.variants) {
            config.lexicon.numbers = Some(numbers.clone());
            config.lexicon.variants = Some(variants.clone());
        }
        Ok(config)
    }

    fn create_formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let formatter: Box<dyn OutputFormatter> = match &self.output {
            Some(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                let writer = BufWriter::new(file);
                match self.format {
                    OutputFormat::Text => Box::new(TextFormatter::new(writer)),
                    OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
                }
            }
            None => match self.format {
                OutputFormat::Text => Box::new(TextFormatter::stdout()),
                OutputFormat::Json => Box::new(JsonFormatter::new(std::io::stdout())),
            },
        };
        Ok(formatter)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // Another logger may already be installed when running under tests
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

/// Run the combined detector, and the unit recognizer when given, over the
/// token stream
fn detect(
    factory: &DetectorFactory,
    mut units: Option<UnitRecognizer>,
    tokens: &[Token],
    formatter: &mut dyn OutputFormatter,
) -> Result<()> {
    let mut numbers = factory.combined();

    for token in tokens {
        for number in numbers.try_token(&token.text, token.begin, token.end) {
            formatter.format_number(&number)?;
        }
        if let Some(recognizer) = units.as_mut() {
            if let Some(unit) = recognizer.advance(&token.text, token.begin, token.end) {
                formatter.format_unit(&unit)?;
            }
        }
    }

    for number in numbers.finish() {
        formatter.format_number(&number)?;
    }
    if let Some(unit) = units.as_mut().and_then(UnitRecognizer::finish) {
        formatter.format_unit(&unit)?;
    }
    Ok(())
}
