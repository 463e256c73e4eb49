//! CSV/JSON conversion module
//!
//! This module contains the conversion pipeline, its options, and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod stats;

pub use config::{ConversionOptions, FieldPolicy, Format};

pub use engine::{convert, convert_reader, convert_to_string, ConversionEngine, ConvertedData};
pub use stats::{ConversionMetadata, ConversionStatistics};

use crate::error::ConversionError;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
