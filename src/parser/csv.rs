//! CSV reader
//!
//! The first row names the fields. Every later row becomes one record whose
//! values stay strings: CSV carries no types, so nothing is coerced.

use std::collections::HashSet;

use crate::conversion::Format;
use crate::error::{ParseError, ParseResult};
use crate::record::{Record, RecordSet, Value};

/// Parse CSV text with a header row into a record set
pub fn read_csv(text: &str) -> ParseResult<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_parse_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Ok(RecordSet::default());
    }
    check_header(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_parse_error)?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, field)| (name.as_str(), Value::from(field)))
            .collect();
        records.push(record);
    }

    tracing::debug!(
        records = records.len(),
        fields = headers.len(),
        "parsed CSV input"
    );

    Ok(RecordSet::new(records))
}

/// Field names must be non-empty and unique
fn check_header(headers: &[String]) -> ParseResult<()> {
    let mut seen = HashSet::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(ParseError::new(
                Format::Csv,
                format!("empty column name at position {} in header", idx + 1),
                None,
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(ParseError::new(
                Format::Csv,
                format!("duplicate column name '{}' in header", name),
                None,
            ));
        }
    }
    Ok(())
}

fn csv_parse_error(err: csv::Error) -> ParseError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos
                .as_ref()
                .map(|p| format!(" on line {}", p.line()))
                .unwrap_or_default();
            ParseError::new(
                Format::Csv,
                format!(
                    "row{} has {} fields, but the header has {}",
                    line, len, expected_len
                ),
                None,
            )
        }
        _ => ParseError::new(Format::Csv, err.to_string(), None),
    }
}
