//! JSON writer

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};

use crate::error::{ConversionError, ConversionResult};
use crate::record::RecordSet;

/// Indentation unit for pretty output
const PRETTY_INDENT: &[u8] = b"\t";

/// Render a record set as a JSON array of objects.
///
/// Pretty output puts every record and property on its own line, indented
/// with tabs. Compact output has no whitespace between tokens. A validated
/// record set always serializes, so any failure here is reported as an
/// internal error.
pub fn write_json(records: &RecordSet, pretty: bool) -> ConversionResult<String> {
    let mut buf = Vec::with_capacity(estimate_len(records));

    let result = if pretty {
        let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)
    } else {
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, CompactFormatter);
        records.serialize(&mut serializer)
    };
    result.map_err(|e| ConversionError::internal(format!("JSON serialization failed: {}", e)))?;

    String::from_utf8(buf)
        .map_err(|e| ConversionError::internal(format!("JSON output is not UTF-8: {}", e)))
}

/// Rough output size from key lengths; values are not rendered to measure them
fn estimate_len(records: &RecordSet) -> usize {
    const PER_FIELD: usize = 16;
    records
        .iter()
        .map(|r| r.field_names().map(|k| k.len() + PER_FIELD).sum::<usize>() + 4)
        .sum::<usize>()
        + 2
}
