//! Value types exchanged across the recognizers

use core::fmt;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Results produced by a single `try_token` or `finish` call.
///
/// One call usually completes zero or one number and occasionally two
/// (one number closes while the token starts or completes another).
pub type NumberResults = SmallVec<[NumberResult; 2]>;

/// A caller-supplied token.
///
/// Offsets are opaque identifiers. The recognizers only copy them into
/// results and never compare them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Identifying begin offset
    pub begin: usize,
    /// Identifying end offset
    pub end: usize,
    /// Token text
    pub text: String,
}

impl Token {
    /// Create a new token
    pub fn new(begin: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            text: text.into(),
        }
    }
}

/// Classification of a recognized number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    /// A counting number: "five", "three hundred"
    Cardinal,
    /// A ranking number: "fifth", "3rd"
    Ordinal,
    /// A ratio: "3 / 4", "five sixths", "50%", "one and a half"
    Fraction,
    /// A digit-form number: "450.01", "42,000"
    Decimal,
}

impl fmt::Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Cardinal => write!(f, "cardinal"),
            NumberType::Ordinal => write!(f, "ordinal"),
            NumberType::Fraction => write!(f, "fraction"),
            NumberType::Decimal => write!(f, "decimal"),
        }
    }
}

/// Category of a single English numeral word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicNumberType {
    /// "one" through "nine"
    Unit,
    /// "ten" through "nineteen"
    Teen,
    /// "twenty", "thirty", ... "ninety"
    Decade,
    /// "thousand", "million", ... The value is an exponent of one thousand.
    Magnitude,
}

impl BasicNumberType {
    /// Parse the category names used by the numbers table
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "unit" => Some(BasicNumberType::Unit),
            "teen" => Some(BasicNumberType::Teen),
            "decade" => Some(BasicNumberType::Decade),
            "magnitude" => Some(BasicNumberType::Magnitude),
            _ => None,
        }
    }
}

/// The meaning of one numeral word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberDefinition {
    /// Numeric value, or the exponent of 1000 for magnitudes
    pub value: u32,
    /// Word category
    pub kind: BasicNumberType,
}

impl NumberDefinition {
    /// Create a new definition
    pub const fn new(value: u32, kind: BasicNumberType) -> Self {
        Self { value, kind }
    }
}

/// A recognized number with its source span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberResult {
    /// Begin offset of the first token of the number
    pub begin: usize,
    /// End offset of the last token of the number
    pub end: usize,
    /// Numerator of the value
    pub numerator: Decimal,
    /// Denominator of the value, one unless this is a fraction
    pub denominator: Decimal,
    /// Classification
    pub number_type: NumberType,
}

impl NumberResult {
    /// Create a result with an explicit denominator
    pub fn new(
        begin: usize,
        end: usize,
        numerator: Decimal,
        denominator: Decimal,
        number_type: NumberType,
    ) -> Self {
        Self {
            begin,
            end,
            numerator,
            denominator,
            number_type,
        }
    }

    /// Create a whole (denominator one) result
    pub fn whole(begin: usize, end: usize, value: Decimal, number_type: NumberType) -> Self {
        Self::new(begin, end, value, Decimal::ONE, number_type)
    }

    /// Create a fraction result
    pub fn fraction(begin: usize, end: usize, numerator: Decimal, denominator: Decimal) -> Self {
        Self::new(begin, end, numerator, denominator, NumberType::Fraction)
    }

    /// The represented value, `None` when the denominator is zero or the
    /// quotient does not fit
    pub fn value(&self) -> Option<Decimal> {
        self.numerator.checked_div(self.denominator)
    }

    /// The represented value rounded half-up to `dp` decimal places
    pub fn rounded_value(&self, dp: u32) -> Option<Decimal> {
        self.value()
            .map(|v| v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl fmt::Display for NumberResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number_type == NumberType::Fraction {
            write!(
                f,
                "{}..{} {} {}/{}",
                self.begin,
                self.end,
                self.number_type,
                self.numerator.normalize(),
                self.denominator.normalize()
            )
        } else {
            write!(
                f,
                "{}..{} {} {}",
                self.begin,
                self.end,
                self.number_type,
                self.numerator.normalize()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            BasicNumberType::from_category("unit"),
            Some(BasicNumberType::Unit)
        );
        assert_eq!(
            BasicNumberType::from_category("magnitude"),
            Some(BasicNumberType::Magnitude)
        );
        assert_eq!(BasicNumberType::from_category("Unit"), None);
        assert_eq!(BasicNumberType::from_category(""), None);
    }

    #[test]
    fn test_value_of_fraction() {
        let half = NumberResult::fraction(0, 3, Decimal::from(11), Decimal::from(2));
        assert_eq!(half.value(), Some(Decimal::new(55, 1)));
        assert_eq!(half.rounded_value(0), Some(Decimal::from(6)));
    }

    #[test]
    fn test_value_with_zero_denominator() {
        let broken = NumberResult::fraction(0, 3, Decimal::ONE, Decimal::ZERO);
        assert_eq!(broken.value(), None);
    }

    #[test]
    fn test_rounded_value_half_up() {
        let third = NumberResult::fraction(0, 1, Decimal::from(2), Decimal::from(3));
        assert_eq!(third.rounded_value(2), Some(Decimal::new(67, 2)));
        let neg = NumberResult::fraction(0, 1, Decimal::from(-5), Decimal::from(2));
        assert_eq!(neg.rounded_value(0), Some(Decimal::from(-3)));
    }

    #[test]
    fn test_display() {
        let cardinal = NumberResult::whole(4, 9, Decimal::from(500), NumberType::Cardinal);
        assert_eq!(cardinal.to_string(), "4..9 cardinal 500");

        let pct = NumberResult::fraction(0, 6, Decimal::new(5005, 2), Decimal::from(100));
        assert_eq!(pct.to_string(), "0..6 fraction 50.05/100");
    }

    #[test]
    fn test_result_serialization() {
        let result = NumberResult::whole(0, 3, Decimal::from(3), NumberType::Ordinal);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"ordinal\""));
        let back: NumberResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
