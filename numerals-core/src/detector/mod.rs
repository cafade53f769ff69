//! Incremental number detection over token streams
//!
//! Every detector follows the same push protocol: feed tokens one at a time
//! with [`NumberDetector::try_token`], then call [`NumberDetector::finish`]
//! once at the end of the stream. Each call returns the numbers it
//! completed, usually none or one.
//!
//! Detectors are stateful and meant for one stream at a time. Use one
//! instance per thread; the [`NumberModel`] they read is shared.

mod combined;
mod decimal;
mod english;
mod fraction;

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;

pub use combined::CombinedDetector;
pub use decimal::DecimalAcceptor;
pub use english::{
    Advance, BasicNumberAcceptor, BasicRun, Consumption, EnglishNumeralsAcceptor,
    NonFractionAcceptor, NumberRun, Pass, WordForm,
};
pub use fraction::FractionDetector;

use crate::error::Result;
use crate::lexicon::MalformedLinePolicy;
use crate::model::NumberModel;
use crate::types::{NumberResult, NumberResults, Token};

/// Push-style incremental number recognition
pub trait NumberDetector {
    /// Offer the next token of the stream
    fn try_token(&mut self, text: &str, begin: usize, end: usize) -> NumberResults;

    /// Signal the end of the stream, flushing any number in progress
    fn finish(&mut self) -> NumberResults;

    /// Discard any number in progress
    fn reset(&mut self);

    /// Run a complete token sequence through the detector, including
    /// `finish`
    fn check_tokens<I>(&mut self, tokens: I) -> Vec<NumberResult>
    where
        I: IntoIterator,
        I::Item: Borrow<Token>,
        Self: Sized,
    {
        let mut results = Vec::new();
        for token in tokens {
            let token = token.borrow();
            results.extend(self.try_token(&token.text, token.begin, token.end));
        }
        results.extend(self.finish());
        results
    }

    /// Lazily detect numbers in a token source
    fn find_numbers<I>(self, tokens: I) -> Numbers<Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Token>,
        Self: Sized,
    {
        Numbers::new(self, tokens.into_iter())
    }
}

impl<T: NumberDetector + ?Sized> NumberDetector for &mut T {
    fn try_token(&mut self, text: &str, begin: usize, end: usize) -> NumberResults {
        (**self).try_token(text, begin, end)
    }

    fn finish(&mut self) -> NumberResults {
        (**self).finish()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<T: NumberDetector + ?Sized> NumberDetector for Box<T> {
    fn try_token(&mut self, text: &str, begin: usize, end: usize) -> NumberResults {
        (**self).try_token(text, begin, end)
    }

    fn finish(&mut self) -> NumberResults {
        (**self).finish()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Pull adapter over a detector and a token source.
///
/// Tokens are read only as results are requested. Once the source is
/// exhausted the detector is finished and the iterator is fused. Dropping
/// it early discards any number still in progress.
#[derive(Debug)]
pub struct Numbers<D, I> {
    detector: D,
    tokens: I,
    pending: VecDeque<NumberResult>,
    finished: bool,
}

impl<D, I> Numbers<D, I>
where
    D: NumberDetector,
    I: Iterator,
    I::Item: Borrow<Token>,
{
    pub fn new(detector: D, tokens: I) -> Self {
        Self {
            detector,
            tokens,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Give back the detector, with any number still in progress.
    ///
    /// Tokens already pulled from the source stay consumed, so the caller
    /// continues from where the iterator stopped.
    pub fn into_detector(self) -> D {
        self.detector
    }
}

impl<D, I> Iterator for Numbers<D, I>
where
    D: NumberDetector,
    I: Iterator,
    I::Item: Borrow<Token>,
{
    type Item = NumberResult;

    fn next(&mut self) -> Option<NumberResult> {
        loop {
            if let Some(result) = self.pending.pop_front() {
                return Some(result);
            }
            if self.finished {
                return None;
            }

            match self.tokens.next() {
                Some(token) => {
                    let token = token.borrow();
                    self.pending
                        .extend(self.detector.try_token(&token.text, token.begin, token.end));
                }
                None => {
                    self.finished = true;
                    self.pending.extend(self.detector.finish());
                }
            }
        }
    }
}

impl<D, I> FusedIterator for Numbers<D, I>
where
    D: NumberDetector,
    I: Iterator,
    I::Item: Borrow<Token>,
{
}

/// Creates detectors that share one [`NumberModel`]
#[derive(Debug, Clone)]
pub struct DetectorFactory {
    model: Arc<NumberModel>,
}

impl DetectorFactory {
    pub fn new(model: Arc<NumberModel>) -> Self {
        Self { model }
    }

    /// Factory over the lexicon compiled into the crate
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(NumberModel::embedded()?))
    }

    /// Factory over lexicon files
    pub fn from_paths(numbers: impl AsRef<Path>, variants: impl AsRef<Path>) -> Result<Self> {
        let model = NumberModel::from_paths(numbers, variants, MalformedLinePolicy::default())?;
        Ok(Self::new(Arc::new(model)))
    }

    pub fn model(&self) -> &Arc<NumberModel> {
        &self.model
    }

    pub fn decimal(&self) -> DecimalAcceptor {
        DecimalAcceptor::new()
    }

    pub fn fraction(&self) -> FractionDetector {
        FractionDetector::new()
    }

    pub fn english(&self) -> EnglishNumeralsAcceptor {
        EnglishNumeralsAcceptor::new(Arc::clone(&self.model))
    }

    pub fn combined(&self) -> CombinedDetector {
        CombinedDetector::new(Arc::clone(&self.model))
    }
}
