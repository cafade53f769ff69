//! Numerals CLI library
//!
//! This library provides the core functionality for the numerals command-line tool.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;

pub use error::CliError;
