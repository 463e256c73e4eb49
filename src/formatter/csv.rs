//! CSV writer
//!
//! The header comes from the first record. Later records are laid out under
//! that header: a missing field renders as an empty cell, and a field the
//! header lacks is either dropped or rejected depending on [`FieldPolicy`].

use crate::conversion::{ConversionOptions, FieldPolicy};
use crate::error::{FormattingError, FormattingResult};
use crate::record::{Record, RecordSet};

/// CSV writer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvWriteOptions {
    pub include_header: bool,
    pub field_policy: FieldPolicy,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            field_policy: FieldPolicy::Drop,
        }
    }
}

impl From<&ConversionOptions> for CsvWriteOptions {
    fn from(options: &ConversionOptions) -> Self {
        Self {
            include_header: options.include_header,
            field_policy: options.field_policy,
        }
    }
}

/// Render a record set as CSV text, one `\n`-terminated line per row
pub fn write_csv(records: &RecordSet, options: &CsvWriteOptions) -> FormattingResult<String> {
    let header = records.header();

    if options.field_policy == FieldPolicy::Reject {
        check_fields(records, &header)?;
    }

    // No columns means nothing to lay out, not even an empty header line
    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if options.include_header {
        writer.write_record(&header)?;
    }

    for record in records {
        writer.write_record(header.iter().map(|field| cell(record, field)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormattingError::csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FormattingError::csv(e.to_string()))
}

fn cell(record: &Record, field: &str) -> String {
    record
        .get(field)
        .map(|value| value.to_field_string())
        .unwrap_or_default()
}

/// First field, in record order, that the header does not have
fn check_fields(records: &RecordSet, header: &[&str]) -> FormattingResult<()> {
    for (idx, record) in records.iter().enumerate() {
        if let Some(extra) = record.field_names().find(|f| !header.contains(f)) {
            return Err(FormattingError::field_mismatch(idx, extra.to_string()));
        }
    }
    Ok(())
}
