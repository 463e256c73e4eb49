//! CSV/JSON Converter
//!
//! Converts flat tabular data between CSV and JSON. Source text is parsed,
//! JSON input is checked to be an array of objects with primitive
//! properties, and the resulting records are rendered in the other format.
//!
//! ```
//! use tabconv::{convert_to_string, ConversionOptions};
//!
//! let csv = convert_to_string(r#"[{"name":"Ada","age":36}]"#, &ConversionOptions::json_to_csv());
//! assert_eq!(csv, Ok("name,age\nAda,36\n".to_string()));
//! ```

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod record;
pub mod validation;

// Re-export commonly used types
pub use conversion::{
    convert, convert_to_string, ConversionEngine, ConversionOptions, ConversionResult,
    ConvertedData, FieldPolicy, Format,
};
pub use error::{ConversionError, ErrorCategory, FormattingError, ParseError};
pub use formatter::RecordFormatter;
pub use parser::InputSource;
pub use record::{Record, RecordSet, Value};
pub use validation::{validate_shape, ValidationOutcome};

/// Convert CSV text to JSON with default options (pretty output)
pub fn csv_to_json(csv: &str) -> Result<String, ConversionError> {
    convert(csv, &ConversionOptions::csv_to_json()).map(|data| data.content)
}

/// Convert JSON text to CSV with default options (header row, extra fields dropped)
pub fn json_to_csv(json: &str) -> Result<String, ConversionError> {
    convert(json, &ConversionOptions::json_to_csv()).map(|data| data.content)
}
