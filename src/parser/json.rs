//! JSON reader
//!
//! Returns the raw parsed tree. Whether that tree is a usable record set is
//! decided afterwards by [`crate::validation`].

use serde_json::Value;

use crate::conversion::Format;
use crate::error::{ParseError, ParseResult};

/// Parse JSON text into an unvalidated value
pub fn read_json(text: &str) -> ParseResult<Value> {
    if text.trim().is_empty() {
        return Err(ParseError::new(
            Format::Json,
            "Empty JSON string".to_string(),
            None,
        ));
    }

    let value: Value = serde_json::from_str(text).map_err(|e| {
        let location = error_location(&e);
        let mut err = ParseError::new(Format::Json, bare_message(&e), location);
        if let Some(preview) = location.and_then(|loc| error_preview(text, loc)) {
            err = err.with_preview(preview);
        }
        err
    })?;

    tracing::debug!(kind = json_type_name(&value), "parsed JSON input");
    Ok(value)
}

/// Line and column of a syntax error. serde_json reports line 0 when it has no position.
fn error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    if error.line() == 0 {
        None
    } else {
        Some((error.line(), error.column()))
    }
}

/// serde_json appends " at line L column C" to its messages; location is carried separately
fn bare_message(error: &serde_json::Error) -> String {
    let full = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    full.strip_suffix(&suffix).unwrap_or(&full).to_string()
}

/// The offending line followed by a caret under the reported column
fn error_preview(content: &str, (line, col): (usize, usize)) -> Option<String> {
    let error_line = content.lines().nth(line.checked_sub(1)?)?;
    let caret_at = col.saturating_sub(1).min(error_line.chars().count());
    Some(format!("{}\n{}^", error_line, " ".repeat(caret_at)))
}

/// Type label of a JSON value as shown in messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
