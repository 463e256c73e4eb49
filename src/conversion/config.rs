//! Configuration options for CSV/JSON conversion

use std::fmt;
use std::path::Path;

use crate::error::ConversionError;

/// Supported text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Csv => "CSV",
            Format::Json => "JSON",
        }
    }

    /// File extension used for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }

    /// The format a conversion from `self` produces
    pub fn counterpart(&self) -> Format {
        match self {
            Format::Csv => Format::Json,
            Format::Json => Format::Csv,
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(format!("Unknown format '{}'. Use 'csv' or 'json'", other)),
        }
    }

    /// Format implied by a file's extension, if it is one we know
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Format::from_str(ext).ok()
    }

    /// Guess the format of raw text: JSON documents we accept open with `[` or `{`
    pub fn sniff(text: &str) -> Format {
        match text.trim_start().chars().next() {
            Some('[') | Some('{') => Format::Json,
            _ => Format::Csv,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the CSV writer does with a field that is absent from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Leave the field out of the row
    Drop,
    /// Fail the conversion with a write error
    Reject,
}

/// Conversion configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Format of the source text
    pub source: Format,
    /// Format to render
    pub target: Format,
    /// Tab-indented JSON output (vs compact)
    pub pretty: bool,
    /// Emit a header row when writing CSV
    pub include_header: bool,
    /// Handling of record fields missing from the CSV header
    pub field_policy: FieldPolicy,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            source: Format::Csv,
            target: Format::Json,
            pretty: true,
            include_header: true,
            field_policy: FieldPolicy::Drop,
        }
    }
}

impl ConversionOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert from `source` into the other format
    pub fn from_source(source: Format) -> Self {
        Self {
            source,
            target: source.counterpart(),
            ..Default::default()
        }
    }

    pub fn csv_to_json() -> Self {
        Self::from_source(Format::Csv)
    }

    pub fn json_to_csv() -> Self {
        Self::from_source(Format::Json)
    }

    /// Set source format
    pub fn with_source(mut self, source: Format) -> Self {
        self.source = source;
        self
    }

    /// Set target format
    pub fn with_target(mut self, target: Format) -> Self {
        self.target = target;
        self
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable/disable the CSV header row
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Set the extra field policy
    pub fn with_field_policy(mut self, policy: FieldPolicy) -> Self {
        self.field_policy = policy;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.source == self.target {
            return Err(ConversionError::configuration(format!(
                "source and target formats must differ (got {} to {})",
                self.source, self.target
            )));
        }

        Ok(())
    }
}
