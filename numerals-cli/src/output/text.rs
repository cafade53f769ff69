//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use numerals_core::{NumberResult, UnitMatch};
use std::io::{self, Write};

/// Plain text formatter - one detection per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_number(&mut self, number: &NumberResult) -> Result<()> {
        writeln!(self.writer, "{number}")?;
        Ok(())
    }

    fn format_unit(&mut self, unit: &UnitMatch) -> Result<()> {
        writeln!(self.writer, "{}..{} unit {}", unit.begin, unit.end, unit.code)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
