//! Units of measure following a number
//!
//! A closed vocabulary maps unit words to UCUM-style codes. The recognizer
//! looks one token back, so `mg / dL` and `milligrams per day` come out as one
//! compound unit.

use std::collections::HashMap;
use std::fs;
use std::mem;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{NumeralsError, Result};
use crate::lexicon::{self, MalformedLinePolicy};

const EMBEDDED_UNITS: &str = include_str!("../data/units.txt");

static EMBEDDED: OnceLock<std::result::Result<Arc<UnitVocabulary>, String>> = OnceLock::new();

/// Unit word to code table
#[derive(Debug, Clone, Default)]
pub struct UnitVocabulary {
    codes: HashMap<String, String>,
}

impl UnitVocabulary {
    /// The vocabulary compiled into the crate
    pub fn embedded() -> Result<Arc<UnitVocabulary>> {
        EMBEDDED
            .get_or_init(|| {
                UnitVocabulary::from_str_with_policy(EMBEDDED_UNITS, MalformedLinePolicy::Fail)
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(NumeralsError::EmbeddedLexicon)
    }

    /// Parse `word:code` lines
    pub fn from_str_with_policy(text: &str, policy: MalformedLinePolicy) -> Result<Self> {
        let codes = lexicon::read_units(text, policy)?;
        tracing::info!(units = codes.len(), "loaded unit vocabulary");
        Ok(Self { codes })
    }

    pub fn from_path(path: impl AsRef<Path>, policy: MalformedLinePolicy) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| NumeralsError::io(path, e))?;
        Self::from_str_with_policy(&text, policy)
    }

    /// Code for a unit word, ignoring case
    pub fn code(&self, word: &str) -> Option<&str> {
        self.codes.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn is_unit_word(&self, word: &str) -> bool {
        self.code(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// A recognized unit of measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMatch {
    pub begin: usize,
    pub end: usize,
    pub code: String,
}

#[derive(Debug, Default)]
enum UnitState {
    #[default]
    Idle,
    Held(UnitMatch),
    /// A held unit followed by "/" or "per"
    Joining(UnitMatch),
}

/// Incremental unit recognizer over a token stream
#[derive(Debug)]
pub struct UnitRecognizer {
    vocabulary: Arc<UnitVocabulary>,
    state: UnitState,
}

impl UnitRecognizer {
    pub fn new(vocabulary: Arc<UnitVocabulary>) -> Self {
        Self {
            vocabulary,
            state: UnitState::Idle,
        }
    }

    pub fn in_progress(&self) -> bool {
        !matches!(self.state, UnitState::Idle)
    }

    pub fn is_unit_word(&self, word: &str) -> bool {
        self.vocabulary.is_unit_word(word)
    }

    /// Offer the next token; returns a unit the token completed
    pub fn advance(&mut self, token: &str, begin: usize, end: usize) -> Option<UnitMatch> {
        let code = self.vocabulary.code(token).map(str::to_string);
        let joiner = token == "/" || token.eq_ignore_ascii_case("per");

        match (mem::take(&mut self.state), code) {
            (UnitState::Idle, Some(code)) => {
                self.state = UnitState::Held(UnitMatch { begin, end, code });
                None
            }
            (UnitState::Idle, None) => None,
            (UnitState::Held(held), _) if joiner => {
                self.state = UnitState::Joining(held);
                None
            }
            (UnitState::Held(held), Some(code)) => {
                self.state = UnitState::Held(UnitMatch { begin, end, code });
                Some(held)
            }
            (UnitState::Held(held), None) => Some(held),
            (UnitState::Joining(held), Some(code)) => {
                self.state = UnitState::Held(UnitMatch {
                    begin: held.begin,
                    end,
                    code: format!("{}/{}", held.code, code),
                });
                None
            }
            (UnitState::Joining(held), None) => {
                tracing::trace!(begin, "dangling unit separator dropped");
                Some(held)
            }
        }
    }

    /// Flush a held unit at end of input
    pub fn finish(&mut self) -> Option<UnitMatch> {
        match mem::take(&mut self.state) {
            UnitState::Idle => None,
            UnitState::Held(held) | UnitState::Joining(held) => Some(held),
        }
    }

    pub fn reset(&mut self) {
        self.state = UnitState::Idle;
    }
}
