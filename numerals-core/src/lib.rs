//! Incremental recognition of numbers in token streams
//!
//! Recognizes digit literals ("450.01", "42,000", "3rd"), digit fractions
//! and percentages ("3 / 4", "50 %"), and English number words ("three
//! hundred and six", "five sixths", "one and a half"). Each number comes out
//! as an exact numerator/denominator pair with the span of tokens it covers.
//!
//! Tokenization is up to the caller: detectors consume pre-segmented tokens
//! with caller-defined begin and end offsets.
//!
//! # Example
//!
//! ```rust
//! use numerals_core::{DetectorFactory, NumberDetector, NumberType, Token};
//! use rust_decimal::Decimal;
//!
//! let factory = DetectorFactory::embedded().unwrap();
//! let tokens = vec![
//!     Token::new(0, 4, "five"),
//!     Token::new(5, 8, "and"),
//!     Token::new(9, 10, "a"),
//!     Token::new(11, 15, "half"),
//! ];
//!
//! let numbers: Vec<_> = factory.combined().find_numbers(tokens).collect();
//! assert_eq!(numbers.len(), 1);
//! assert_eq!(numbers[0].number_type, NumberType::Fraction);
//! assert_eq!(numbers[0].numerator, Decimal::from(11));
//! assert_eq!(numbers[0].denominator, Decimal::from(2));
//! ```
//!
//! # Architecture
//!
//! - [`NumberModel`]: read-only word tables, shared between detectors
//! - [`DecimalAcceptor`] and [`FractionDetector`]: digit forms
//! - [`EnglishNumeralsAcceptor`]: word forms, built on
//!   [`NonFractionAcceptor`] and [`BasicNumberAcceptor`]
//! - [`CombinedDetector`]: both at once
//! - [`UnitRecognizer`]: units of measure, used alongside the detectors

pub mod config;
pub mod detector;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod types;
pub mod units;

pub use config::NumeralsConfig;
pub use detector::{
    BasicNumberAcceptor, CombinedDetector, DecimalAcceptor, DetectorFactory,
    EnglishNumeralsAcceptor, FractionDetector, NonFractionAcceptor, NumberDetector, Numbers,
};
pub use error::{NumeralsError, Result};
pub use lexicon::MalformedLinePolicy;
pub use model::{ModelStats, NumberModel, NumberModelBuilder};
pub use types::{
    BasicNumberType, NumberDefinition, NumberResult, NumberResults, NumberType, Token,
};
pub use units::{UnitMatch, UnitRecognizer, UnitVocabulary};
