//! Record set writers

pub mod csv;
pub mod json;

pub use self::csv::{write_csv, CsvWriteOptions};
pub use self::json::write_json;

use crate::conversion::{ConversionOptions, Format};
use crate::error::ConversionResult;
use crate::record::RecordSet;

/// Renders record sets in the target format of a set of options
pub struct RecordFormatter {
    target: Format,
    pretty: bool,
    csv_options: CsvWriteOptions,
}

impl RecordFormatter {
    /// Create a new formatter with configuration
    pub fn new(options: &ConversionOptions) -> Self {
        Self {
            target: options.target,
            pretty: options.pretty,
            csv_options: CsvWriteOptions::from(options),
        }
    }

    /// Format a record set in the target format
    pub fn format(&self, records: &RecordSet) -> ConversionResult<String> {
        let output = match self.target {
            Format::Json => write_json(records, self.pretty)?,
            Format::Csv => write_csv(records, &self.csv_options)?,
        };
        tracing::debug!(
            target_format = %self.target,
            bytes = output.len(),
            "rendered output"
        );
        Ok(output)
    }
}
