//! Error types and handling infrastructure for CSV/JSON conversion

use std::fmt;
use std::path::PathBuf;

use crate::conversion::Format;

/// Broad category of a conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Source and target formats identical, unknown format tag, bad option mix
    Configuration,
    /// Source text does not match the grammar of its format
    Parse,
    /// Parsed JSON is not an array of flat objects
    Validation,
    /// A record set could not be rendered in the target format
    Write,
    /// Reading input or writing output failed
    Io,
    /// Invariant violated inside the engine
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Parse => "parse",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Write => "write",
            ErrorCategory::Io => "io",
            ErrorCategory::Internal => "internal",
        }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Cannot tell the source format of {subject}")]
    UnknownSourceFormat { subject: String },

    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{reason}")]
    Validation { reason: String },

    #[error(transparent)]
    FormattingError(#[from] FormattingError),

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ConversionError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn parse(format: Format, message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(format, message, location))
    }

    pub fn unknown_source_format(subject: impl Into<String>) -> Self {
        Self::UnknownSourceFormat {
            subject: subject.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Which part of the pipeline rejected the input
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } | Self::UnknownSourceFormat { .. } => {
                ErrorCategory::Configuration
            }
            Self::ParseError(_) => ErrorCategory::Parse,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::FormattingError(_) => ErrorCategory::Write,
            Self::Io { .. } => ErrorCategory::Io,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True when the caller can fix the failure by changing input or options.
    /// Internal errors are bugs and are reported as such.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => match err.location {
                Some((line, col)) => format!(
                    "{} parse error at line {}, column {}: {}",
                    err.format, line, col, err.message
                ),
                None => format!("{} parse error: {}", err.format, err.message),
            },
            Self::Validation { reason } => reason.clone(),
            Self::FormattingError(err) => format!("CSV write error: {}", err),
            Self::Io {
                message,
                path: Some(path),
            } => format!("IO error for '{}': {}", path.display(), message),
            _ => self.to_string(),
        }
    }
}

/// Errors raised by the CSV and JSON readers
#[derive(Debug, Clone)]
pub struct ParseError {
    pub format: Format,
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(format: Format, message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            format,
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while rendering a record set
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("record at index {record} has field '{field}' that is not in the header")]
    FieldMismatch { record: usize, field: String },

    #[error("{message}")]
    Csv { message: String },
}

impl FormattingError {
    pub fn field_mismatch(record: usize, field: String) -> Self {
        Self::FieldMismatch { record, field }
    }

    pub fn csv(message: String) -> Self {
        Self::Csv { message }
    }
}

impl From<csv::Error> for FormattingError {
    fn from(err: csv::Error) -> Self {
        Self::csv(err.to_string())
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for formatting operations
pub type FormattingResult<T> = Result<T, FormattingError>;
