//! TOML configuration
//!
//! ```toml
//! [lexicon]
//! numbers = "nrnum.txt"
//! variants = "nrvar.txt"
//! malformed_lines = "skip"
//!
//! [units]
//! vocabulary = "units.txt"
//! ```
//!
//! Every field is optional. Without lexicon paths the embedded lexicon is
//! used. Relative paths are resolved against the directory of the
//! configuration file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{NumeralsError, Result};
use crate::lexicon::MalformedLinePolicy;
use crate::model::NumberModel;
use crate::units::UnitVocabulary;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumeralsConfig {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub units: UnitsConfig,
}

/// Where the numeral tables come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconConfig {
    /// Numbers table (`id|word|category|value|...|exponent`)
    pub numbers: Option<PathBuf>,
    /// Variants table (`variant|id|flags|norm`)
    pub variants: Option<PathBuf>,
    #[serde(default)]
    pub malformed_lines: MalformedLinePolicy,
}

/// Where the unit vocabulary comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitsConfig {
    /// `word:code` file
    pub vocabulary: Option<PathBuf>,
}

impl NumeralsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: NumeralsConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, resolving relative paths against its
    /// directory
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| NumeralsError::io(path, e))?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match (&self.lexicon.numbers, &self.lexicon.variants) {
            (Some(_), None) => Err(NumeralsError::Config(
                "lexicon.numbers is set but lexicon.variants is not".to_string(),
            )),
            (None, Some(_)) => Err(NumeralsError::Config(
                "lexicon.variants is set but lexicon.numbers is not".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.lexicon.numbers,
            &mut self.lexicon.variants,
            &mut self.units.vocabulary,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Build the number model this configuration describes
    pub fn load_model(&self) -> Result<Arc<NumberModel>> {
        self.validate()?;
        match (&self.lexicon.numbers, &self.lexicon.variants) {
            (Some(numbers), Some(variants)) => Ok(Arc::new(NumberModel::from_paths(
                numbers,
                variants,
                self.lexicon.malformed_lines,
            )?)),
            _ => NumberModel::embedded(),
        }
    }

    /// Build the unit vocabulary this configuration describes
    pub fn load_units(&self) -> Result<Arc<UnitVocabulary>> {
        match &self.units.vocabulary {
            Some(path) => Ok(Arc::new(UnitVocabulary::from_path(
                path,
                self.lexicon.malformed_lines,
            )?)),
            None => UnitVocabulary::embedded(),
        }
    }
}
