//! Lexicon table parsing
//!
//! Both numeral tables are pipe-delimited, one record per line.
//!
//! Numbers table: `id|word|category|value|...|exponent`. `category` is one of
//! `unit`, `teen`, `decade`, `magnitude`. Magnitudes read their value from
//! field 5 (an exponent of one thousand), everything else from field 3.
//!
//! Variants table: `variant|id|flags|norm`. A variant is registered as an
//! ordinal when `flags` contains `ordinal` and as a denominator when it
//! contains `denominator`, with the definition of `norm` from the numbers
//! table.
//!
//! The unit vocabulary is `word:code`, one entry per line.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconTable, NumeralsError, Result};
use crate::types::{BasicNumberType, NumberDefinition};

/// What to do with a line that cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Abort loading with an error
    #[default]
    Fail,
    /// Log a warning and continue with the next line
    Skip,
}

/// Ordinal and denominator variant tables
#[derive(Debug, Default)]
pub(crate) struct Variants {
    pub ordinals: HashMap<String, NumberDefinition>,
    pub denominators: HashMap<String, NumberDefinition>,
}

/// A parsed variants-table record
#[derive(Debug, PartialEq, Eq)]
struct VariantRecord<'a> {
    word: &'a str,
    ordinal: bool,
    denominator: bool,
    norm: &'a str,
}

fn parse_number_line(line: &str) -> std::result::Result<(String, NumberDefinition), String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 4 {
        return Err(format!("expected at least 4 fields, found {}", fields.len()));
    }

    let word = fields[1].trim();
    if word.is_empty() {
        return Err("empty word".to_string());
    }

    let kind = BasicNumberType::from_category(fields[2].trim())
        .ok_or_else(|| format!("unrecognized number category '{}'", fields[2]))?;

    let raw_value = if kind == BasicNumberType::Magnitude {
        *fields
            .get(5)
            .ok_or_else(|| "magnitude without exponent field".to_string())?
    } else {
        fields[3]
    };
    let value = raw_value
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid value '{raw_value}': {e}"))?;

    Ok((word.to_lowercase(), NumberDefinition::new(value, kind)))
}

fn parse_variant_line(line: &str) -> std::result::Result<VariantRecord<'_>, String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 4 {
        return Err(format!("expected at least 4 fields, found {}", fields.len()));
    }

    let word = fields[0].trim();
    if word.is_empty() {
        return Err("empty variant".to_string());
    }

    Ok(VariantRecord {
        word,
        ordinal: fields[2].contains("ordinal"),
        denominator: fields[2].contains("denominator"),
        norm: fields[3].trim(),
    })
}

fn parse_unit_line(line: &str) -> std::result::Result<(String, String), String> {
    let (word, code) = line
        .split_once(':')
        .ok_or_else(|| "expected 'word:code'".to_string())?;
    let word = word.trim();
    let code = code.trim();
    if word.is_empty() || code.is_empty() {
        return Err("empty unit word or code".to_string());
    }
    Ok((word.to_lowercase(), code.to_string()))
}

/// Apply the policy to a bad line
fn reject(policy: MalformedLinePolicy, error: NumeralsError) -> Result<()> {
    match policy {
        MalformedLinePolicy::Fail => Err(error),
        MalformedLinePolicy::Skip => {
            tracing::warn!("skipping lexicon line: {error}");
            Ok(())
        }
    }
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Parse the numbers table
pub(crate) fn read_numbers(
    text: &str,
    policy: MalformedLinePolicy,
) -> Result<HashMap<String, NumberDefinition>> {
    let mut numbers = HashMap::new();

    for (line_no, line) in numbered_lines(text) {
        match parse_number_line(line) {
            Ok((word, definition)) => {
                numbers.insert(word, definition);
            }
            Err(reason) => reject(
                policy,
                NumeralsError::MalformedLine {
                    table: LexiconTable::Numbers,
                    line: line_no,
                    reason,
                },
            )?,
        }
    }

    Ok(numbers)
}

/// Parse the variants table against an already loaded numbers table
pub(crate) fn read_variants(
    text: &str,
    numbers: &HashMap<String, NumberDefinition>,
    policy: MalformedLinePolicy,
) -> Result<Variants> {
    let mut variants = Variants::default();

    for (line_no, line) in numbered_lines(text) {
        let record = match parse_variant_line(line) {
            Ok(record) => record,
            Err(reason) => {
                reject(
                    policy,
                    NumeralsError::MalformedLine {
                        table: LexiconTable::Variants,
                        line: line_no,
                        reason,
                    },
                )?;
                continue;
            }
        };

        if !record.ordinal && !record.denominator {
            continue;
        }

        let Some(&definition) = numbers.get(&record.norm.to_lowercase()) else {
            reject(
                policy,
                NumeralsError::UnresolvedVariant {
                    line: line_no,
                    variant: record.word.to_string(),
                    norm: record.norm.to_string(),
                },
            )?;
            continue;
        };

        let word = record.word.to_lowercase();
        if record.ordinal {
            variants.ordinals.insert(word.clone(), definition);
        }
        if record.denominator {
            variants.denominators.insert(word, definition);
        }
    }

    Ok(variants)
}

/// Parse a unit vocabulary
pub(crate) fn read_units(
    text: &str,
    policy: MalformedLinePolicy,
) -> Result<HashMap<String, String>> {
    let mut units = HashMap::new();

    for (line_no, line) in numbered_lines(text) {
        match parse_unit_line(line) {
            Ok((word, code)) => {
                units.insert(word, code);
            }
            Err(reason) => reject(
                policy,
                NumeralsError::MalformedLine {
                    table: LexiconTable::Units,
                    line: line_no,
                    reason,
                },
            )?,
        }
    }

    Ok(units)
}
