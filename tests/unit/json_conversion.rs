//! Unit tests for the JSON side of conversion
//!
//! Tests cover:
//! - Reading JSON text and reporting syntax errors with positions
//! - Pretty and compact JSON output
//! - Key order and number preservation

use tabconv::formatter::write_json;
use tabconv::parser::read_json;
use tabconv::{
    json_to_csv, ConversionEngine, ConversionError, ConversionOptions, Record, RecordSet, Value,
};

#[cfg(test)]
mod json_reader_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_any_json_value() {
        assert_eq!(read_json("42").unwrap(), json!(42));
        assert_eq!(read_json(" [ ] ").unwrap(), json!([]));
        assert_eq!(read_json(r#"{"a":null}"#).unwrap(), json!({"a": null}));
    }

    #[test]
    fn test_blank_input_is_parse_error() {
        let err = read_json(" \n\t").unwrap_err();
        assert_eq!(err.message, "Empty JSON string");
        assert_eq!(err.location, None);
    }

    #[test]
    fn test_syntax_error_location() {
        let err = read_json("[\n  {\"a\": 1,,}\n]").unwrap_err();
        let (line, column) = err.location.unwrap();
        assert_eq!(line, 2);
        assert!(column > 0);
        assert!(!err.message.contains(" at line "));

        let preview = err.input_preview.unwrap();
        assert!(preview.starts_with("  {\"a\": 1,,}\n"));
        assert!(preview.ends_with('^'));
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        assert!(read_json("[] []").is_err());
    }
}

#[cfg(test)]
mod json_writer_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn people() -> RecordSet {
        RecordSet::new(vec![
            [("name", Value::from("Ada")), ("age", Value::from(36i64))]
                .into_iter()
                .collect::<Record>(),
            [("name", Value::from("Grace")), ("admin", Value::from(true))]
                .into_iter()
                .collect::<Record>(),
        ])
    }

    #[test]
    fn test_pretty_output_uses_tabs() {
        let json = write_json(&people(), true).unwrap();
        assert_eq!(
            json,
            "[\n\t{\n\t\t\"name\": \"Ada\",\n\t\t\"age\": 36\n\t},\n\t{\n\t\t\"name\": \"Grace\",\n\t\t\"admin\": true\n\t}\n]"
        );
    }

    #[test]
    fn test_compact_output() {
        let json = write_json(&people(), false).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Ada","age":36},{"name":"Grace","admin":true}]"#
        );
    }

    #[test]
    fn test_numbers_render_as_written() {
        let csv = json_to_csv(r#"[{"big":12345678901234567890,"f":0.25,"neg":-7}]"#).unwrap();
        assert_eq!(csv, "big,f,neg\n12345678901234567890,0.25,-7\n");

        let csv = json_to_csv(
            r#"[{"one":1.0,"sci":1E2,"pi":3.14159265358979323846,"huge":12345678901234567890123,"far":1e400}]"#,
        )
        .unwrap();
        assert_eq!(
            csv,
            "one,sci,pi,huge,far\n1.0,1E2,3.14159265358979323846,12345678901234567890123,1e400\n"
        );
    }

    #[test]
    fn test_number_literals_survive_json_output() {
        let engine = ConversionEngine::new(ConversionOptions::json_to_csv());
        let records = engine
            .validate_only(r#"[{"a":1.0,"b":1E2,"c":0.30000000000000000004}]"#)
            .unwrap();
        assert_eq!(
            write_json(&records, false).unwrap(),
            r#"[{"a":1.0,"b":1E2,"c":0.30000000000000000004}]"#
        );
    }

    #[test]
    fn test_object_key_order_survives() {
        let csv = json_to_csv(r#"[{"z":1,"a":2}]"#).unwrap();
        assert_eq!(csv, "z,a\n1,2\n");
    }

    #[test]
    fn test_error_is_reported_not_panicked() {
        let err = json_to_csv(r#"[{"a":{"b":1}}]"#).unwrap_err();
        assert!(matches!(err, ConversionError::Validation { .. }));
    }
}
