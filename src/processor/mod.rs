//! The functional core: script text in, resolved level out.
pub mod error;
pub mod level_parser;
pub mod numeric;
pub mod objects;
pub mod patterns;

use crate::model::{LevelDocument, RawLevel};
use anyhow::{Context, Result};
use error::ParseError;

/// Output of the processor, handed to `writer`.
#[derive(Debug, Clone)]
pub struct ProcessedLevel {
    pub document: LevelDocument,
    /// Non-fatal problems, in the order they were found.
    pub diagnostics: Vec<ParseError>,
}

/// Runs every processing pass and returns a read-only structure for writers.
pub fn run(raw: &RawLevel) -> ProcessedLevel {
    let processed = level_parser::parse_level(&raw.source, &raw.name);
    if !processed.diagnostics.is_empty() {
        log::warn!(
            "level `{}` parsed with {} problem(s)",
            raw.name,
            processed.diagnostics.len()
        );
    }
    processed
}

/// Text in, compact JSON out.
///
/// Never fails on bad input: anything that can't be decoded shows up as
/// `"INVALID_DATA"` in the output.
pub fn parse(source: &str, level_name: &str) -> Result<String> {
    let processed = level_parser::parse_level(source, level_name);
    processed
        .document
        .to_json()
        .with_context(|| format!("Serialising level `{level_name}`"))
}
