//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use numerals_core::{NumberResult, NumberType, UnitMatch};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs detections as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    detections: Vec<Detection>,
}

/// One entry of the JSON array
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Detection {
    Number {
        begin: usize,
        end: usize,
        #[serde(rename = "type")]
        number_type: NumberType,
        numerator: String,
        denominator: String,
        /// Quotient rounded to six places, absent when it does not fit
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Unit {
        begin: usize,
        end: usize,
        code: String,
    },
}

impl From<&NumberResult> for Detection {
    fn from(number: &NumberResult) -> Self {
        Detection::Number {
            begin: number.begin,
            end: number.end,
            number_type: number.number_type,
            numerator: number.numerator.normalize().to_string(),
            denominator: number.denominator.normalize().to_string(),
            value: number
                .rounded_value(6)
                .map(|value| value.normalize().to_string()),
        }
    }
}

impl From<&UnitMatch> for Detection {
    fn from(unit: &UnitMatch) -> Self {
        Detection::Unit {
            begin: unit.begin,
            end: unit.end,
            code: unit.code.clone(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            detections: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_number(&mut self, number: &NumberResult) -> Result<()> {
        self.detections.push(number.into());
        Ok(())
    }

    fn format_unit(&mut self, unit: &UnitMatch) -> Result<()> {
        self.detections.push(unit.into());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.detections)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
