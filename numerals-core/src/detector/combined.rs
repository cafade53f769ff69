//! Digit-form and word-form detection over one token stream
//!
//! Runs [`FractionDetector`] and [`EnglishNumeralsAcceptor`] side by side
//! and keeps their results from overlapping.

use std::sync::Arc;

use super::english::EnglishNumeralsAcceptor;
use super::fraction::FractionDetector;
use super::NumberDetector;
use crate::model::NumberModel;
use crate::types::NumberResults;

/// Digit-form and word-form detection over the same stream.
///
/// Every token goes to both a [`FractionDetector`] and an
/// [`EnglishNumeralsAcceptor`]. When one of them emits a number that ends
/// at the current token, the token belongs to that number and the other
/// detector is reset, so a token is never part of two numbers.
#[derive(Debug)]
pub struct CombinedDetector {
    digits: FractionDetector,
    words: EnglishNumeralsAcceptor,
}

impl CombinedDetector {
    pub fn new(model: Arc<NumberModel>) -> Self {
        Self {
            digits: FractionDetector::new(),
            words: EnglishNumeralsAcceptor::new(model),
        }
    }

    pub fn in_progress(&self) -> bool {
        self.digits.in_progress() || self.words.in_progress()
    }
}

/// Merge in begin-offset order, keeping each side's own order on ties
fn merge(mut first: NumberResults, second: NumberResults) -> NumberResults {
    if second.is_empty() {
        return first;
    }
    first.extend(second);
    first.sort_by_key(|result| result.begin);
    first
}

impl NumberDetector for CombinedDetector {
    fn try_token(&mut self, text: &str, begin: usize, end: usize) -> NumberResults {
        let digits = self.digits.try_token(text, begin, end);
        let words = self.words.try_token(text, begin, end);

        if digits.iter().any(|r| r.end == end) {
            self.words.reset();
        } else if words.iter().any(|r| r.end == end) {
            self.digits.reset();
        }

        merge(digits, words)
    }

    fn finish(&mut self) -> NumberResults {
        let digits = self.digits.finish();
        let words = self.words.finish();
        merge(digits, words)
    }

    fn reset(&mut self) {
        self.digits.reset();
        self.words.reset();
    }
}
