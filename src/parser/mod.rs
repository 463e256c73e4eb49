//! Source readers and input handling

pub mod csv;
pub mod directory;
pub mod json;

pub use self::csv::read_csv;
pub use self::json::read_json;

use crate::error::{ConversionError, ConversionResult};
use std::io::Read;
use std::path::PathBuf;

/// Where source text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Raw text passed directly
    String(String),
    /// Single file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl InputSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            InputSource::String(_) => "string input".to_string(),
            InputSource::File(path) => format!("file: {}", path.display()),
            InputSource::Stdin => "standard input".to_string(),
        }
    }

    /// Get the estimated size of the source in bytes (if known)
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            InputSource::String(s) => Some(s.len() as u64),
            InputSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            InputSource::Stdin => None, // Unknown until read
        }
    }

    /// Path of a file source
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            InputSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Read the whole source as text
    pub fn read_content(&self) -> ConversionResult<String> {
        match self {
            InputSource::String(content) => Ok(content.clone()),
            InputSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                ConversionError::io(format!("Failed to read file: {}", e), Some(path.clone()))
            }),
            InputSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| ConversionError::io(format!("Failed to read stdin: {}", e), None))?;
                Ok(buffer)
            }
        }
    }
}
