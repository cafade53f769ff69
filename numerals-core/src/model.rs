//! Shared numeral lookup tables
//!
//! A [`NumberModel`] is built once and then shared read-only (behind an
//! [`Arc`]) by every detector instance. There is no mutation path after
//! construction.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{NumeralsError, Result};
use crate::lexicon::{self, MalformedLinePolicy};
use crate::types::{BasicNumberType, NumberDefinition};

const EMBEDDED_NUMBERS: &str = include_str!("../data/nrnum.txt");
const EMBEDDED_VARIANTS: &str = include_str!("../data/nrvar.txt");

static EMBEDDED: OnceLock<std::result::Result<Arc<NumberModel>, String>> = OnceLock::new();

/// Word to number definition tables
#[derive(Debug, Clone, Default)]
pub struct NumberModel {
    numbers: HashMap<String, NumberDefinition>,
    ordinals: HashMap<String, NumberDefinition>,
    denominators: HashMap<String, NumberDefinition>,
}

/// Entry counts of a model, reported after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStats {
    pub numbers: usize,
    pub ordinals: usize,
    pub denominators: usize,
}

impl NumberModel {
    /// Start building a model by hand
    pub fn builder() -> NumberModelBuilder {
        NumberModelBuilder::default()
    }

    /// The English lexicon compiled into the crate.
    ///
    /// Parsed on first use and shared afterwards.
    pub fn embedded() -> Result<Arc<NumberModel>> {
        EMBEDDED
            .get_or_init(|| {
                NumberModel::from_lexicon_str(
                    EMBEDDED_NUMBERS,
                    EMBEDDED_VARIANTS,
                    MalformedLinePolicy::Fail,
                )
                .map(Arc::new)
                .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(NumeralsError::EmbeddedLexicon)
    }

    /// Parse the two lexicon tables from their text
    pub fn from_lexicon_str(
        numbers: &str,
        variants: &str,
        policy: MalformedLinePolicy,
    ) -> Result<Self> {
        let numbers = lexicon::read_numbers(numbers, policy)?;
        let variants = lexicon::read_variants(variants, &numbers, policy)?;

        let model = NumberModel {
            numbers,
            ordinals: variants.ordinals,
            denominators: variants.denominators,
        };

        let stats = model.stats();
        tracing::info!(
            numbers = stats.numbers,
            ordinals = stats.ordinals,
            denominators = stats.denominators,
            "loaded number model"
        );

        Ok(model)
    }

    /// Load the two lexicon tables from files
    pub fn from_paths(
        numbers: impl AsRef<Path>,
        variants: impl AsRef<Path>,
        policy: MalformedLinePolicy,
    ) -> Result<Self> {
        let numbers_path = numbers.as_ref();
        let variants_path = variants.as_ref();

        let numbers_text =
            fs::read_to_string(numbers_path).map_err(|e| NumeralsError::io(numbers_path, e))?;
        let variants_text =
            fs::read_to_string(variants_path).map_err(|e| NumeralsError::io(variants_path, e))?;

        tracing::debug!(
            numbers = %numbers_path.display(),
            variants = %variants_path.display(),
            "reading lexicon files"
        );

        Self::from_lexicon_str(&numbers_text, &variants_text, policy)
    }

    /// Definition of a plain numeral word
    pub fn number_definition(&self, word: &str) -> Option<NumberDefinition> {
        self.numbers.get(lowercase(word).as_ref()).copied()
    }

    /// Definition of a word that is only valid as an ordinal
    pub fn ordinal(&self, word: &str) -> Option<NumberDefinition> {
        self.ordinals.get(lowercase(word).as_ref()).copied()
    }

    /// Definition of a word that is only valid as a fraction denominator
    pub fn denominator(&self, word: &str) -> Option<NumberDefinition> {
        self.denominators.get(lowercase(word).as_ref()).copied()
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            numbers: self.numbers.len(),
            ordinals: self.ordinals.len(),
            denominators: self.denominators.len(),
        }
    }
}

fn lowercase(word: &str) -> Cow<'_, str> {
    if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Builder for [`NumberModel`], mostly useful for small test models
#[derive(Debug, Default)]
pub struct NumberModelBuilder {
    model: NumberModel,
}

impl NumberModelBuilder {
    pub fn number(mut self, word: &str, value: u32, kind: BasicNumberType) -> Self {
        self.model
            .numbers
            .insert(word.to_lowercase(), NumberDefinition::new(value, kind));
        self
    }

    pub fn ordinal(mut self, word: &str, value: u32, kind: BasicNumberType) -> Self {
        self.model
            .ordinals
            .insert(word.to_lowercase(), NumberDefinition::new(value, kind));
        self
    }

    pub fn denominator(mut self, word: &str, value: u32, kind: BasicNumberType) -> Self {
        self.model
            .denominators
            .insert(word.to_lowercase(), NumberDefinition::new(value, kind));
        self
    }

    pub fn build(self) -> NumberModel {
        self.model
    }
}
