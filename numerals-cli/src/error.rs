//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// A token line without the expected tab-separated fields
    InvalidTokenLine { line: usize, reason: String },
    /// A begin or end offset that is not a non-negative integer
    InvalidOffset {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidTokenLine { line, reason } => {
                write!(f, "Invalid token on line {line}: {reason}")
            }
            CliError::InvalidOffset { line, field, value } => {
                write!(f, "Invalid {field} offset on line {line}: {value:?}")
            }
        }
    }
}

impl std::error::Error for CliError {}
