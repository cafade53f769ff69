//! Single-token digit literal parsing

use rust_decimal::Decimal;

use crate::types::{NumberResult, NumberType};

/// Most digits after the point a `Decimal` can hold; longer literals are rejected
const MAX_SCALE: u32 = 28;

/// Two-character suffixes that mark a digit literal as an ordinal
const ORDINAL_SUFFIXES: [(char, char); 4] = [('t', 'h'), ('s', 't'), ('n', 'd'), ('r', 'd')];

/// Parses one digit token: `450.01`, `42,000`, `-3`, `3rd`, `50%`.
///
/// Holds no state; every call is independent of the previous ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalAcceptor;

impl DecimalAcceptor {
    pub fn new() -> Self {
        DecimalAcceptor
    }

    /// Parse `text`, returning `None` when it does not start a number.
    ///
    /// Scanning stops at the first character that cannot continue a number,
    /// keeping the digits collected so far. A trailing `%` turns the value
    /// into a fraction over one hundred.
    pub fn try_token(&self, text: &str, begin: usize, end: usize) -> Option<NumberResult> {
        let mut chars = text.chars().peekable();

        let negative = match *chars.peek()? {
            '-' => {
                chars.next();
                true
            }
            '+' => {
                chars.next();
                false
            }
            c if c.is_ascii_digit() => false,
            _ => return None,
        };

        // All digits as one integer; the point only decides the scale
        let mut mantissa: i128 = 0;
        let mut fraction_digits = 0u32;
        let mut seen_point = false;
        let mut digits = 0usize;
        let mut number_type = NumberType::Decimal;
        let mut percent = false;

        while let Some(c) = chars.next() {
            match c {
                '0'..='9' => {
                    let digit = i128::from(c.to_digit(10)?);
                    mantissa = mantissa.checked_mul(10)?.checked_add(digit)?;
                    digits += 1;
                    if seen_point {
                        fraction_digits += 1;
                    }
                }
                ',' => {}
                // a later point moves the split: "1.2.3" is 12.3
                '.' => {
                    seen_point = true;
                    fraction_digits = 0;
                }
                '%' if digits > 0 && chars.peek().is_none() => percent = true,
                c => {
                    if digits == 0 {
                        return None;
                    }
                    if let Some(&next) = chars.peek() {
                        if ORDINAL_SUFFIXES.contains(&(c, next)) {
                            number_type = NumberType::Ordinal;
                        }
                    }
                    break;
                }
            }
        }

        if digits == 0 || fraction_digits > MAX_SCALE {
            return None;
        }

        if negative {
            mantissa = -mantissa;
        }
        let value = Decimal::try_from_i128_with_scale(mantissa, fraction_digits).ok()?;

        if percent {
            Some(NumberResult::fraction(
                begin,
                end,
                value,
                Decimal::ONE_HUNDRED,
            ))
        } else {
            Some(NumberResult::whole(begin, end, value, number_type))
        }
    }
}
