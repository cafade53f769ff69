//! Error types
//!
//! Only construction can fail: reading and parsing the lexicon, the unit
//! vocabulary, or a configuration file. Per-token recognition never errors;
//! a token that is not part of a number simply yields no results.

use std::path::PathBuf;
use thiserror::Error;

/// Which lexicon table a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconTable {
    /// Numeral definitions (word, category, value)
    Numbers,
    /// Ordinal and denominator variants of numeral words
    Variants,
    /// Unit of measure vocabulary
    Units,
}

impl std::fmt::Display for LexiconTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexiconTable::Numbers => write!(f, "numbers"),
            LexiconTable::Variants => write!(f, "variants"),
            LexiconTable::Units => write!(f, "units"),
        }
    }
}

/// Errors raised while building models and configuration
#[derive(Error, Debug)]
pub enum NumeralsError {
    /// A file could not be read
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// The file being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A lexicon line could not be parsed
    #[error("malformed {table} line {line}: {reason}")]
    MalformedLine {
        /// Table the line belongs to
        table: LexiconTable,
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A variant refers to a word missing from the numbers table
    #[error("variant '{variant}' on line {line} refers to unknown word '{norm}'")]
    UnresolvedVariant {
        /// 1-based line number in the variants table
        line: usize,
        /// The variant word
        variant: String,
        /// The normalized word that was not found
        norm: String,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The lexicon compiled into the crate failed to load
    #[error("embedded lexicon failed to load: {0}")]
    EmbeddedLexicon(String),
}

impl NumeralsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NumeralsError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for NumeralsError {
    fn from(err: toml::de::Error) -> Self {
        NumeralsError::Config(err.to_string())
    }
}

/// Result type for construction-time operations
pub type Result<T, E = NumeralsError> = std::result::Result<T, E>;
