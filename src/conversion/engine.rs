//! Core conversion engine: read, validate, write

use std::time::Instant;

use crate::conversion::config::{ConversionOptions, Format};
use crate::conversion::stats::ConversionMetadata;
use crate::conversion::ConversionResult;
use crate::formatter::RecordFormatter;
use crate::parser::{read_csv, read_json, InputSource};
use crate::record::RecordSet;
use crate::validation::into_record_set;

/// Core conversion result
#[derive(Debug, Clone)]
pub struct ConvertedData {
    pub content: String,
    pub metadata: ConversionMetadata,
}

impl ConvertedData {
    /// Create a new conversion result
    pub fn new(content: String, metadata: ConversionMetadata) -> Self {
        Self { content, metadata }
    }

    /// Get the rendered output
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Main conversion engine
///
/// Holds nothing but its options, so one engine can serve any number of
/// independent calls, from any thread.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    options: ConversionOptions,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert source text into the target format
    pub fn convert(&self, source_text: &str) -> ConversionResult<ConvertedData> {
        let start_time = Instant::now();

        let records = self.read_records(source_text)?;
        let content = RecordFormatter::new(&self.options).format(&records)?;

        let metadata = ConversionMetadata::new(
            self.options.source,
            self.options.target,
            &records,
            source_text.len(),
            content.len(),
            start_time.elapsed(),
        );

        tracing::debug!(
            source = %self.options.source,
            target = %self.options.target,
            records = metadata.record_count,
            "conversion finished"
        );

        Ok(ConvertedData::new(content, metadata))
    }

    /// Convert the text of an input source
    pub fn convert_from_source(&self, source: &InputSource) -> ConversionResult<ConvertedData> {
        let text = source.read_content()?;
        self.convert(&text)
    }

    /// Parse and validate without rendering
    pub fn validate_only(&self, source_text: &str) -> ConversionResult<RecordSet> {
        self.read_records(source_text)
    }

    /// Configuration check, the source reader, and for JSON the shape validator
    fn read_records(&self, source_text: &str) -> ConversionResult<RecordSet> {
        self.options.validate()?;

        match self.options.source {
            Format::Csv => Ok(read_csv(source_text)?),
            Format::Json => {
                let value = read_json(source_text)?;
                into_record_set(value)
            }
        }
    }
}

/// High-level conversion functions
/// Convert source text with the given options
pub fn convert(source_text: &str, options: &ConversionOptions) -> ConversionResult<ConvertedData> {
    ConversionEngine::new(options.clone()).convert(source_text)
}

/// Convert source text, collapsing any failure into its description
pub fn convert_to_string(source_text: &str, options: &ConversionOptions) -> Result<String, String> {
    convert(source_text, options)
        .map(|data| data.content)
        .map_err(|e| e.user_message())
}

/// Convert everything readable from `reader`
pub fn convert_reader<R: std::io::Read>(
    reader: R,
    options: &ConversionOptions,
) -> ConversionResult<ConvertedData> {
    let content = std::io::read_to_string(reader).map_err(|e| {
        crate::error::ConversionError::io(format!("Failed to read stream: {}", e), None)
    })?;

    convert(&content, options)
}
