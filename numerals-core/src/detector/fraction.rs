//! Digit fractions and percentages spread over several tokens

use std::mem;

use rust_decimal::Decimal;

use super::decimal::DecimalAcceptor;
use super::NumberDetector;
use crate::types::{NumberResult, NumberResults, NumberType};

#[derive(Debug, Default)]
enum FractionState {
    #[default]
    Empty,
    /// A digit number that may turn out to be a numerator
    Numerator(NumberResult),
    /// Numerator followed by `/`
    Slash(NumberResult),
    /// `N / M` seen, waiting for one more token to confirm it
    Both {
        numerator: NumberResult,
        denominator: NumberResult,
    },
}

/// Chains digit literals into `N / M` fractions and `N %` percentages.
///
/// A fraction is only confirmed by the token after its denominator: another
/// `/` (as in a date) or a zero denominator splits it back into two plain
/// numbers.
#[derive(Debug, Default)]
pub struct FractionDetector {
    decimal: DecimalAcceptor,
    state: FractionState,
}

impl FractionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a number is pending
    pub fn in_progress(&self) -> bool {
        !matches!(self.state, FractionState::Empty)
    }

    /// Handle a token with no pending numerator
    fn start(&mut self, text: &str, begin: usize, end: usize, results: &mut NumberResults) {
        match self.decimal.try_token(text, begin, end) {
            Some(result) if result.number_type == NumberType::Decimal => {
                self.state = FractionState::Numerator(result);
            }
            // ordinals and percentages are never numerators
            Some(result) => results.push(result),
            None => {}
        }
    }
}

impl NumberDetector for FractionDetector {
    fn try_token(&mut self, text: &str, begin: usize, end: usize) -> NumberResults {
        let mut results = NumberResults::new();

        match mem::take(&mut self.state) {
            FractionState::Empty => self.start(text, begin, end, &mut results),
            FractionState::Numerator(numerator) => match text {
                "/" => self.state = FractionState::Slash(numerator),
                "%" => results.push(NumberResult::fraction(
                    numerator.begin,
                    end,
                    numerator.numerator,
                    Decimal::ONE_HUNDRED,
                )),
                _ => {
                    results.push(numerator);
                    self.start(text, begin, end, &mut results);
                }
            },
            FractionState::Slash(numerator) => match self.decimal.try_token(text, begin, end) {
                Some(denominator) if denominator.number_type != NumberType::Fraction => {
                    self.state = FractionState::Both {
                        numerator,
                        denominator,
                    };
                }
                Some(percent) => {
                    results.push(numerator);
                    results.push(percent);
                }
                None => {
                    tracing::trace!(begin, "slash not followed by a number");
                    results.push(numerator);
                }
            },
            FractionState::Both {
                numerator,
                denominator,
            } => {
                if text == "/" || denominator.numerator.is_zero() {
                    tracing::debug!(
                        begin = numerator.begin,
                        end = denominator.end,
                        "fraction rejected, emitting parts"
                    );
                    results.push(numerator);
                    results.push(denominator);
                } else {
                    results.push(NumberResult::fraction(
                        numerator.begin,
                        denominator.end,
                        numerator.numerator,
                        denominator.numerator,
                    ));
                }
                if text != "/" {
                    self.start(text, begin, end, &mut results);
                }
            }
        }

        results
    }

    fn finish(&mut self) -> NumberResults {
        let mut results = NumberResults::new();

        match mem::take(&mut self.state) {
            FractionState::Empty => {}
            FractionState::Numerator(numerator) | FractionState::Slash(numerator) => {
                results.push(numerator);
            }
            FractionState::Both {
                numerator,
                denominator,
            } => {
                if denominator.numerator.is_zero() {
                    results.push(numerator);
                    results.push(denominator);
                } else {
                    results.push(NumberResult::fraction(
                        numerator.begin,
                        denominator.end,
                        numerator.numerator,
                        denominator.numerator,
                    ));
                }
            }
        }

        results
    }

    fn reset(&mut self) {
        self.state = FractionState::Empty;
    }
}
