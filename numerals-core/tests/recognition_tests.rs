//! End-to-end recognition against the embedded lexicon

use numerals_core::*;
use rust_decimal::Decimal;

/// Tokens separated by single spaces, with character offsets
fn tokens(words: &[&str]) -> Vec<Token> {
    let mut offset = 0;
    words
        .iter()
        .map(|word| {
            let token = Token::new(offset, offset + word.len(), *word);
            offset += word.len() + 1;
            token
        })
        .collect()
}

fn factory() -> DetectorFactory {
    DetectorFactory::embedded().unwrap()
}

fn int(n: i64) -> Decimal {
    Decimal::from(n)
}

#[test]
fn test_rejected_token_leaves_no_state() {
    let mut fraction = factory().fraction();
    for text in ["test", "-", "", "+", "and", "/"] {
        assert!(fraction.try_token(text, 0, text.len()).is_empty());
        assert!(fraction.finish().is_empty(), "{text:?} left state behind");
    }
}

#[test]
fn test_digit_fraction() {
    let results = factory()
        .fraction()
        .check_tokens(&tokens(&["25", "/", "35", "units"]));

    assert_eq!(results.len(), 1);
    let fraction = &results[0];
    assert_eq!(fraction.number_type, NumberType::Fraction);
    assert_eq!(fraction.numerator, int(25));
    assert_eq!(fraction.denominator, int(35));
    assert_eq!((fraction.begin, fraction.end), (0, 7));
}

#[test]
fn test_divide_by_zero_guard() {
    let results = factory()
        .fraction()
        .check_tokens(&tokens(&["124", "/", "0", "units"]));

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.number_type == NumberType::Decimal));
    assert!(results.iter().all(|r| r.denominator == Decimal::ONE));
    assert_eq!(results[0].numerator, int(124));
    assert_eq!(results[1].numerator, int(0));
}

#[test]
fn test_ordinal_short_circuit() {
    let mut combined = factory().combined();
    let results = combined.try_token("3rd", 0, 3);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number_type, NumberType::Ordinal);
    assert_eq!(results[0].numerator, int(3));
    assert_eq!(results[0].denominator, Decimal::ONE);
}

#[test]
fn test_english_cardinal_chain() {
    let mut english = factory().english();
    assert!(english.try_token("five", 0, 4).is_empty());
    assert!(english.try_token("hundred", 5, 12).is_empty());
    let results = english.finish();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number_type, NumberType::Cardinal);
    assert_eq!(results[0].numerator, int(500));
    assert_eq!((results[0].begin, results[0].end), (0, 12));
}

#[test]
fn test_english_half_idiom() {
    let results = factory()
        .combined()
        .check_tokens(&tokens(&["five", "and", "a", "half"]));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number_type, NumberType::Fraction);
    assert_eq!(results[0].numerator, int(11));
    assert_eq!(results[0].denominator, int(2));
    assert_eq!(results[0].value(), Some(Decimal::new(55, 1)));
}

#[test]
fn test_percent_as_fraction() {
    let results = factory().combined().check_tokens(&tokens(&["50.05", "%"]));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number_type, NumberType::Fraction);
    assert_eq!(results[0].numerator, Decimal::new(5005, 2));
    assert_eq!(results[0].denominator, int(100));
    assert_eq!((results[0].begin, results[0].end), (0, 7));
}

#[test]
fn test_percent_inside_token() {
    let results = factory().combined().check_tokens(&tokens(&["12.5%", "of", "patients"]));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rounded_value(3), Some(Decimal::new(125, 3)));
}

#[test]
fn test_reset_matches_fresh_instance() {
    let factory = factory();
    let stream = tokens(&["three", "hundred", "and", "six", "3", "/", "4", "units"]);

    let mut used = factory.combined();
    used.check_tokens(&tokens(&["twenty", "-"]));
    used.try_token("7", 100, 101);
    used.try_token("/", 102, 103);
    used.reset();

    let mut fresh = factory.combined();
    assert_eq!(used.check_tokens(&stream), fresh.check_tokens(&stream));
}

#[test]
fn test_emission_resets_detectors() {
    let factory = factory();
    let stream = tokens(&["forty", "sixths"]);

    let mut english = factory.english();
    let first = english.check_tokens(&stream);
    let second = english.check_tokens(&stream);
    assert_eq!(first, second);
}

#[test]
fn test_number_before_digit_fraction() {
    let results = factory()
        .combined()
        .check_tokens(&tokens(&["25", "25", "/", "35", "units"]));

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].number_type, NumberType::Decimal);
    assert_eq!((results[0].begin, results[0].end), (0, 2));
    assert_eq!(results[1].number_type, NumberType::Fraction);
    assert_eq!((results[1].begin, results[1].end), (3, 10));
}

#[test]
fn test_date_like_slashes() {
    let results = factory()
        .combined()
        .check_tokens(&tokens(&["25", "/", "35", "/"]));
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.number_type == NumberType::Decimal));
}

#[test]
fn test_word_fractions() {
    let factory = factory();

    let results = factory.combined().check_tokens(&tokens(&["five", "forty", "sixths"]));
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].numerator, results[0].denominator), (int(5), int(46)));
    assert_eq!((results[0].begin, results[0].end), (0, 17));

    let results = factory.combined().check_tokens(&tokens(&["three", "quarters"]));
    assert_eq!((results[0].numerator, results[0].denominator), (int(3), int(4)));

    let results = factory.combined().check_tokens(&tokens(&["two", "thirds", "of", "them"]));
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].numerator, results[0].denominator), (int(2), int(3)));
}

#[test]
fn test_cardinal_word_denominator() {
    let factory = factory();

    let results = factory.combined().check_tokens(&tokens(&["five", "six", "people"]));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number_type, NumberType::Fraction);
    assert_eq!((results[0].numerator, results[0].denominator), (int(5), int(6)));
    assert_eq!((results[0].begin, results[0].end), (0, 8));

    let results = factory.english().check_tokens(&tokens(&["two", "three"]));
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].numerator, results[0].denominator), (int(2), int(3)));
}

#[test]
fn test_word_zero_denominator_guard() {
    let results = factory().combined().check_tokens(&tokens(&["five", "zero", "units"]));

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.number_type == NumberType::Cardinal));
    assert_eq!(results[0].numerator, int(5));
    assert_eq!(results[1].numerator, int(0));
}

#[test]
fn test_large_lexicon_values() {
    let model = NumberModel::builder()
        .number("big", 4_000_000_000, BasicNumberType::Unit)
        .number("vast", 4_000_000_000, BasicNumberType::Decade)
        .number("thousand", 1, BasicNumberType::Magnitude)
        .build();
    let factory = DetectorFactory::new(std::sync::Arc::new(model));

    let results = factory.english().check_tokens(&tokens(&["big", "hundred"]));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].numerator, Decimal::from(400_000_000_000u64));

    let results = factory
        .combined()
        .check_tokens(&tokens(&["vast", "-", "big", "thousand"]));
    // the decade-unit sum does not fit, so "big" starts the second number
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number_type, NumberType::Fraction);
    assert_eq!(results[0].numerator, Decimal::from(4_000_000_000u64));
    assert_eq!(results[0].denominator, Decimal::from(4_000_000_000_000u64));
}

#[test]
fn test_decimal_places_limit() {
    let decimal = factory().decimal();

    let text = format!("0.{}5", "0".repeat(27));
    let result = decimal.try_token(&text, 0, text.len()).unwrap();
    assert_eq!(result.numerator, Decimal::new(5, 28));

    let text = format!("0.{}1", "0".repeat(28));
    assert!(decimal.try_token(&text, 0, text.len()).is_none());

    let result = decimal.try_token("1.2.3", 0, 5).unwrap();
    assert_eq!(result.numerator, Decimal::new(123, 1));
}

#[test]
fn test_large_word_numbers() {
    let factory = factory();

    let results = factory
        .combined()
        .check_tokens(&tokens(&["five", "billion", "five", "million"]));
    assert_eq!(results[0].numerator, int(5_005_000_000));

    let results = factory.combined().check_tokens(&tokens(&[
        "two", "hundred", "thirty", "one", "thousand", "and", "forty", "two",
    ]));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].numerator, int(231_042));
}

#[test]
fn test_digit_literal_forms() {
    let decimal = factory().decimal();

    let grouped = decimal.try_token("42,000,000.00", 0, 13).unwrap();
    assert_eq!(grouped.numerator, int(42_000_000));

    let fractional = decimal.try_token("450.01", 0, 6).unwrap();
    assert_eq!(fractional.numerator, Decimal::new(45001, 2));
    assert_eq!(fractional.number_type, NumberType::Decimal);

    assert!(decimal.try_token("test", 0, 4).is_none());
    assert!(decimal.try_token("-", 0, 1).is_none());
}

#[test]
fn test_sentence() {
    let words = [
        "The", "2nd", "dose", "of", "twenty", "-", "five", "mg", "was", "given", "to", "one",
        "hundred", "and", "six", "patients", ",", "about", "3", "/", "4", "of", "the", "cohort",
    ];
    let results: Vec<_> = factory().combined().find_numbers(tokens(&words)).collect();

    let summary: Vec<_> = results
        .iter()
        .map(|r| (r.number_type, r.numerator, r.denominator))
        .collect();
    assert_eq!(
        summary,
        vec![
            (NumberType::Ordinal, int(2), int(1)),
            (NumberType::Cardinal, int(25), int(1)),
            (NumberType::Cardinal, int(106), int(1)),
            (NumberType::Fraction, int(3), int(4)),
        ]
    );
}

#[test]
fn test_results_display() {
    let results = factory().combined().check_tokens(&tokens(&["1", "/", "3"]));
    assert_eq!(results[0].to_string(), "0..5 fraction 1/3");
    assert_eq!(results[0].rounded_value(2), Some(Decimal::new(33, 2)));
}
