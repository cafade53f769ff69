//! Output formatting module

use anyhow::Result;
use numerals_core::{NumberResult, UnitMatch};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a recognized number
    fn format_number(&mut self, number: &NumberResult) -> Result<()>;

    /// Format and output a recognized unit of measure
    fn format_unit(&mut self, unit: &UnitMatch) -> Result<()>;

    /// Finalize output (e.g., write the buffered JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
