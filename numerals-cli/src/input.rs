//! Pre-tokenized input
//!
//! One token per line: `begin<TAB>end<TAB>text`. Blank lines are ignored.
//! The text field is taken verbatim and may itself contain tabs.

use anyhow::{Context, Result};
use numerals_core::Token;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::CliError;

/// Reader for tab-separated token streams
pub struct TokenReader;

impl TokenReader {
    /// Read tokens from a file
    pub fn read_path(path: &Path) -> Result<Vec<Token>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::read_from(BufReader::new(file))
            .with_context(|| format!("Failed to parse tokens from: {}", path.display()))
    }

    /// Read tokens from standard input
    pub fn read_stdin() -> Result<Vec<Token>> {
        Self::read_from(io::stdin().lock()).context("Failed to parse tokens from stdin")
    }

    /// Read tokens from any buffered source
    pub fn read_from<R: BufRead>(reader: R) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            tokens.push(parse_line(line, index + 1)?);
        }
        log::debug!("Read {} tokens", tokens.len());
        Ok(tokens)
    }
}

fn parse_line(line: &str, number: usize) -> Result<Token, CliError> {
    let mut fields = line.splitn(3, '\t');
    let (Some(begin), Some(end), Some(text)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(CliError::InvalidTokenLine {
            line: number,
            reason: "expected begin, end and text separated by tabs".to_string(),
        });
    };

    let offset = |field: &'static str, value: &str| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|_| CliError::InvalidOffset {
                line: number,
                field,
                value: value.to_string(),
            })
    };

    Ok(Token::new(offset("begin", begin)?, offset("end", end)?, text))
}
