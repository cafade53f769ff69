//! English numeral words
//!
//! Three nested recognizers:
//! - [`BasicNumberAcceptor`]: one run ("seven", "forty-five")
//! - [`NonFractionAcceptor`]: runs joined by "hundred" and magnitude words
//! - [`EnglishNumeralsAcceptor`]: a numerator chain, optionally followed by
//!   a denominator chain ("five sixths") or the "and a half" idiom
//!
//! Each step reports whether it consumed the token it was given. A step that
//! completes a number without consuming the token ([`Consumption::Retry`])
//! hands the same token back to the caller to be read again.

mod basic;
mod non_fraction;

use std::mem;
use std::sync::Arc;

use rust_decimal::Decimal;

pub use basic::BasicNumberAcceptor;
pub use non_fraction::NonFractionAcceptor;

use super::NumberDetector;
use crate::model::NumberModel;
use crate::types::{BasicNumberType, NumberDefinition, NumberResult, NumberResults, NumberType};

/// Upper bound on how many times one token is read by the acceptor
const MAX_PASSES: usize = 3;

/// Whether a completing step used up its token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumption {
    /// The token is part of the completed number
    Consumed,
    /// The token ended the number but is not part of it; read it again
    Retry,
}

/// Outcome of offering one token to a word recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance<T> {
    /// Not a numeral here; nothing was pending
    NoMatch,
    /// The token extended a number that is still open
    Continue,
    /// A number is complete
    Complete(T, Consumption),
}

/// Which table a numeral word was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordForm {
    /// "five"
    Cardinal,
    /// "fifth"
    Ordinal,
    /// "fifths", "half"
    Denominator,
}

/// Whether denominator-only words are recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Numerator,
    Denominator,
}

/// A completed single-run numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicRun {
    pub begin: usize,
    pub end: usize,
    pub value: u32,
    pub form: WordForm,
}

/// A completed numeral chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberRun {
    pub begin: usize,
    pub end: usize,
    pub value: Decimal,
    pub form: WordForm,
    /// The chain absorbed a trailing "and" ("one hundred and ...")
    pub conjunction: bool,
}

impl From<BasicRun> for NumberRun {
    fn from(run: BasicRun) -> Self {
        NumberRun {
            begin: run.begin,
            end: run.end,
            value: Decimal::from(run.value),
            form: run.form,
            conjunction: false,
        }
    }
}

impl NumberRun {
    fn to_result(&self, number_type: NumberType) -> NumberResult {
        NumberResult::whole(self.begin, self.end, self.value, number_type)
    }
}

/// Look a word up in the model.
///
/// The denominator table takes precedence in the denominator pass, so
/// "third" reads as a denominator after a numerator and as an ordinal
/// otherwise.
pub(crate) fn classify(
    model: &NumberModel,
    text: &str,
    pass: Pass,
) -> Option<(NumberDefinition, WordForm)> {
    let denominator = match pass {
        Pass::Denominator => model.denominator(text).map(|d| (d, WordForm::Denominator)),
        Pass::Numerator => None,
    };

    denominator
        .or_else(|| model.number_definition(text).map(|d| (d, WordForm::Cardinal)))
        .or_else(|| model.ordinal(text).map(|d| (d, WordForm::Ordinal)))
}

/// Progress of the "and a half" idiom after a numerator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HalfIdiom {
    Unarmed,
    And,
    AndA,
}

#[derive(Debug, Default)]
enum EnglishState {
    #[default]
    Idle,
    Numerator { run: NumberRun, half: HalfIdiom },
}

/// Recognizes English numbers, ordinals and fractions written in words.
///
/// Once a numerator chain is complete, the following tokens are read as a
/// possible denominator: "five sixths", "one half", "three hundredths", or
/// the idioms "and a half" and "and a quarter".
#[derive(Debug)]
pub struct EnglishNumeralsAcceptor {
    model: Arc<NumberModel>,
    chain: NonFractionAcceptor,
    state: EnglishState,
}

impl EnglishNumeralsAcceptor {
    pub fn new(model: Arc<NumberModel>) -> Self {
        Self {
            chain: NonFractionAcceptor::new(Arc::clone(&model)),
            model,
            state: EnglishState::Idle,
        }
    }

    pub fn in_progress(&self) -> bool {
        matches!(self.state, EnglishState::Numerator { .. }) || self.chain.in_progress()
    }

    /// Read the token once in the current state
    fn step(&mut self, text: &str, begin: usize, end: usize, results: &mut NumberResults) -> Consumption {
        match mem::take(&mut self.state) {
            EnglishState::Idle => match self.chain.try_token(text, begin, end, Pass::Numerator) {
                Advance::NoMatch | Advance::Continue => Consumption::Consumed,
                Advance::Complete(run, consumption) => {
                    if run.form == WordForm::Ordinal {
                        results.push(run.to_result(NumberType::Ordinal));
                    } else {
                        self.capture(run);
                    }
                    consumption
                }
            },
            EnglishState::Numerator { run, half } => {
                if !self.chain.in_progress() {
                    if let Some(consumption) = self.connector(&run, half, text, end, results) {
                        return consumption;
                    }
                }
                self.denominator(run, text, begin, end, results)
            }
        }
    }

    /// Hyphens, "and", "a" and the word completing the half idiom.
    ///
    /// Returns `None` when the token is none of these, leaving the state
    /// for the caller to restore.
    fn connector(
        &mut self,
        run: &NumberRun,
        half: HalfIdiom,
        text: &str,
        end: usize,
        results: &mut NumberResults,
    ) -> Option<Consumption> {
        let next = if text == "-" {
            Some(half)
        } else if text.eq_ignore_ascii_case("and") {
            Some(HalfIdiom::And)
        } else if text.eq_ignore_ascii_case("a") && half == HalfIdiom::And {
            Some(HalfIdiom::AndA)
        } else {
            None
        };

        if let Some(half) = next {
            self.state = EnglishState::Numerator {
                run: run.clone(),
                half,
            };
            return Some(Consumption::Consumed);
        }

        if half != HalfIdiom::AndA {
            return None;
        }

        let denominator = if text.eq_ignore_ascii_case("half") {
            Decimal::TWO
        } else {
            let definition = self
                .model
                .denominator(text)
                .filter(|d| d.kind != BasicNumberType::Magnitude)?;
            Decimal::from(definition.value)
        };

        // n and 1/d = (n * d + 1) / d
        match run
            .value
            .checked_mul(denominator)
            .and_then(|v| v.checked_add(Decimal::ONE))
        {
            Some(numerator) => {
                results.push(NumberResult::fraction(run.begin, end, numerator, denominator));
            }
            None => {
                tracing::debug!(begin = run.begin, "mixed fraction overflow");
                results.push(run.to_result(NumberType::Cardinal));
            }
        }
        Some(Consumption::Consumed)
    }

    /// Read the token as the start or continuation of a denominator
    fn denominator(
        &mut self,
        numerator: NumberRun,
        text: &str,
        begin: usize,
        end: usize,
        results: &mut NumberResults,
    ) -> Consumption {
        match self.chain.try_token(text, begin, end, Pass::Denominator) {
            Advance::NoMatch => {
                results.push(numerator.to_result(NumberType::Cardinal));
                Consumption::Retry
            }
            Advance::Continue => {
                self.state = EnglishState::Numerator {
                    run: numerator,
                    half: HalfIdiom::Unarmed,
                };
                Consumption::Consumed
            }
            Advance::Complete(run, consumption) => {
                Self::close(numerator, run, results);
                consumption
            }
        }
    }

    /// Combine a captured numerator with the run that completed after it.
    ///
    /// Whatever completes in the denominator pass is the denominator
    /// ("five sixths", "five six"), unless its value is zero.
    fn close(numerator: NumberRun, run: NumberRun, results: &mut NumberResults) {
        if run.value.is_zero() {
            tracing::debug!(begin = numerator.begin, "zero denominator, emitting parts");
            let number_type = match run.form {
                WordForm::Ordinal => NumberType::Ordinal,
                _ => NumberType::Cardinal,
            };
            results.push(numerator.to_result(NumberType::Cardinal));
            results.push(run.to_result(number_type));
        } else {
            results.push(NumberResult::fraction(
                numerator.begin,
                run.end,
                numerator.value,
                run.value,
            ));
        }
    }

    fn capture(&mut self, run: NumberRun) {
        let half = if run.conjunction {
            HalfIdiom::And
        } else {
            HalfIdiom::Unarmed
        };
        self.state = EnglishState::Numerator { run, half };
    }
}

impl NumberDetector for EnglishNumeralsAcceptor {
    fn try_token(&mut self, text: &str, begin: usize, end: usize) -> NumberResults {
        let mut results = NumberResults::new();

        for _ in 0..MAX_PASSES {
            if self.step(text, begin, end, &mut results) == Consumption::Consumed {
                return results;
            }
        }

        tracing::trace!(token = text, begin, "token dropped after repeated reads");
        results
    }

    fn finish(&mut self) -> NumberResults {
        let mut results = NumberResults::new();
        let pending = self.chain.finish();

        match mem::take(&mut self.state) {
            EnglishState::Idle => {
                if let Some(run) = pending {
                    let number_type = match run.form {
                        WordForm::Ordinal => NumberType::Ordinal,
                        _ => NumberType::Cardinal,
                    };
                    results.push(run.to_result(number_type));
                }
            }
            EnglishState::Numerator { run, .. } => match pending {
                Some(next) => Self::close(run, next, &mut results),
                None => results.push(run.to_result(NumberType::Cardinal)),
            },
        }

        results
    }

    fn reset(&mut self) {
        self.state = EnglishState::Idle;
        self.chain.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    fn acceptor() -> EnglishNumeralsAcceptor {
        EnglishNumeralsAcceptor::new(NumberModel::embedded().unwrap())
    }

    fn tokens(text: &str) -> Vec<Token> {
        let mut offset = 0;
        text.split(' ')
            .map(|word| {
                let token = Token::new(offset, offset + word.len(), word);
                offset += word.len() + 1;
                token
            })
            .collect()
    }

    fn detect(text: &str) -> Vec<NumberResult> {
        acceptor().check_tokens(&tokens(text))
    }

    fn int(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_mixed_decade_denominator() {
        let results = detect("five forty sixths");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!(results[0].numerator, int(5));
        assert_eq!(results[0].denominator, int(46));
        assert_eq!((results[0].begin, results[0].end), (0, 17));
    }

    #[test]
    fn test_decade_denominator() {
        let results = detect("forty sixths");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].numerator, int(40));
        assert_eq!(results[0].denominator, int(6));
    }

    #[test]
    fn test_and_a_half() {
        let results = detect("five and a half");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!(results[0].numerator, int(11));
        assert_eq!(results[0].denominator, int(2));
        assert_eq!((results[0].begin, results[0].end), (0, 15));
    }

    #[test]
    fn test_and_a_half_emits_without_finish() {
        let mut english = acceptor();
        let toks = tokens("five and a half");
        let mut emitted = Vec::new();
        for token in &toks {
            emitted.extend(english.try_token(&token.text, token.begin, token.end));
        }
        assert_eq!(emitted.len(), 1);
        assert!(!english.in_progress());
    }

    #[test]
    fn test_hundred_and_a_half() {
        let results = detect("one hundred and a half");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].numerator, int(201));
        assert_eq!(results[0].denominator, int(2));
    }

    #[test]
    fn test_and_a_quarter() {
        let results = detect("two and a quarter");
        assert_eq!(results[0].numerator, int(9));
        assert_eq!(results[0].denominator, int(4));
    }

    #[test]
    fn test_cardinal_chain() {
        let results = detect("fifteen hundred forty five");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Cardinal);
        assert_eq!(results[0].numerator, int(1545));
    }

    #[test]
    fn test_billions() {
        let results = detect("five billion five million");
        assert_eq!(results[0].numerator, int(5_005_000_000));
    }

    #[test]
    fn test_number_followed_by_word() {
        let results = detect("five billion people");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].numerator, int(5_000_000_000));
        assert_eq!(results[0].end, 12);
    }

    #[test]
    fn test_decade_at_end() {
        let results = detect("forty");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].numerator, int(40));
        assert_eq!(results[0].number_type, NumberType::Cardinal);
    }

    #[test]
    fn test_ordinal_word() {
        let mut english = acceptor();
        let results = english.try_token("fifteenth", 0, 9);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Ordinal);
        assert_eq!(results[0].numerator, int(15));
    }

    #[test]
    fn test_hyphenated_half() {
        let results = detect("one - half");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].numerator, int(1));
        assert_eq!(results[0].denominator, int(2));
    }

    #[test]
    fn test_hundredths() {
        let results = detect("three hundredths");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!(results[0].numerator, int(3));
        assert_eq!(results[0].denominator, int(100));
    }

    #[test]
    fn test_cardinal_denominator() {
        let results = detect("five six people");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!(results[0].numerator, int(5));
        assert_eq!(results[0].denominator, int(6));
        assert_eq!((results[0].begin, results[0].end), (0, 8));

        let results = detect("two three");
        assert_eq!(results.len(), 1);
        assert_eq!((results[0].numerator, results[0].denominator), (int(2), int(3)));
    }

    #[test]
    fn test_chain_denominator() {
        let results = detect("one two hundred");
        assert_eq!(results.len(), 1);
        assert_eq!((results[0].numerator, results[0].denominator), (int(1), int(200)));
        assert_eq!((results[0].begin, results[0].end), (0, 15));
    }

    #[test]
    fn test_zero_denominator_splits() {
        let results = detect("five zero");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.number_type == NumberType::Cardinal));
        assert_eq!(results[0].numerator, int(5));
        assert_eq!(results[1].numerator, int(0));
        assert_eq!((results[1].begin, results[1].end), (5, 9));
    }

    #[test]
    fn test_ordinal_after_numerator() {
        let results = detect("two fifth");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!(results[0].denominator, int(5));

        // "first" has no denominator form; it still closes the fraction
        let results = detect("chapter two first");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!((results[0].numerator, results[0].denominator), (int(2), int(1)));
    }

    #[test]
    fn test_and_without_half() {
        let results = detect("five and six");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number_type, NumberType::Fraction);
        assert_eq!((results[0].numerator, results[0].denominator), (int(5), int(6)));
        assert_eq!((results[0].begin, results[0].end), (0, 12));
    }

    #[test]
    fn test_non_numerals() {
        assert!(detect("the quick fox").is_empty());
        assert!(detect("a half").is_empty());
    }

    #[test]
    fn test_reset() {
        let mut english = acceptor();
        english.try_token("five", 0, 4);
        assert!(english.in_progress());
        english.reset();
        assert!(!english.in_progress());
        assert!(english.finish().is_empty());
    }
}
