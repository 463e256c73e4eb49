//! Unit tests for the CSV side of conversion
//!
//! Tests cover:
//! - Reading CSV text into records
//! - Writing records as CSV under each field policy
//! - Parse errors for malformed input

use tabconv::error::ParseError;
use tabconv::formatter::{write_csv, CsvWriteOptions};
use tabconv::parser::read_csv;
use tabconv::{csv_to_json, FieldPolicy, Format, Record, RecordSet, Value};

#[cfg(test)]
mod csv_reader_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_defines_field_order() {
        let set = read_csv("z,a,m\n1,2,3\n").unwrap();
        assert_eq!(set.header(), vec!["z", "a", "m"]);
        assert_eq!(
            set.records()[0].iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["z", "a", "m"]
        );
    }

    #[test]
    fn test_header_only_gives_no_records() {
        let set = read_csv("a,b\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_cells_are_empty_strings() {
        let set = read_csv("a,b\n,x\n").unwrap();
        assert_eq!(set.records()[0].get("a"), Some(&Value::from("")));
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let err: ParseError = read_csv("a,b,c\n1,2\n").unwrap_err();
        assert_eq!(err.format, Format::Csv);
        assert!(err.message.contains("has 2 fields, but the header has 3"));
    }

    #[test]
    fn test_duplicate_header_is_parse_error() {
        let err = read_csv("a,a\n1,2\n").unwrap_err();
        assert!(err.message.contains("duplicate column name 'a'"));
    }

    #[test]
    fn test_values_are_not_coerced() {
        let json = csv_to_json("n,b,e\n007,false,\n").unwrap();
        assert_eq!(
            json,
            "[\n\t{\n\t\t\"n\": \"007\",\n\t\t\"b\": \"false\",\n\t\t\"e\": \"\"\n\t}\n]"
        );
    }
}

#[cfg(test)]
mod csv_writer_tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use tabconv::error::FormattingError;

    fn record(fields: &[(&str, Value)]) -> Record {
        fields.iter().cloned().collect()
    }

    fn reject() -> CsvWriteOptions {
        CsvWriteOptions {
            field_policy: FieldPolicy::Reject,
            ..CsvWriteOptions::default()
        }
    }

    #[test]
    fn test_primitive_values_render_as_text() {
        let set = RecordSet::new(vec![record(&[
            ("s", Value::from("text")),
            ("i", Value::from(-3i64)),
            ("b", Value::from(true)),
            ("n", Value::Null),
        ])]);
        let csv = write_csv(&set, &CsvWriteOptions::default()).unwrap();
        assert_eq!(csv, "s,i,b,n\ntext,-3,true,\n");
    }

    #[test]
    fn test_special_characters_are_quoted() {
        let set = RecordSet::new(vec![record(&[
            ("a", Value::from("x,y")),
            ("b", Value::from("line\nbreak")),
            ("c", Value::from("say \"hi\"")),
        ])]);
        let csv = write_csv(&set, &CsvWriteOptions::default()).unwrap();
        assert_eq!(csv, "a,b,c\n\"x,y\",\"line\nbreak\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_later_records_follow_first_header() {
        let set = RecordSet::new(vec![
            record(&[("a", Value::from("1")), ("b", Value::from("2"))]),
            record(&[("b", Value::from("3")), ("a", Value::from("4"))]),
        ]);
        let csv = write_csv(&set, &CsvWriteOptions::default()).unwrap();
        assert_eq!(csv, "a,b\n1,2\n4,3\n");
    }

    #[test]
    fn test_reject_reports_first_extra_field() {
        let set = RecordSet::new(vec![
            record(&[("a", Value::from("1"))]),
            record(&[("a", Value::from("2"))]),
            record(&[("q", Value::from("3")), ("r", Value::from("4"))]),
        ]);
        let err = write_csv(&set, &reject()).unwrap_err();
        assert_matches!(
            err,
            FormattingError::FieldMismatch { record: 2, ref field } if field == "q"
        );
    }

    #[test]
    fn test_reject_accepts_missing_fields() {
        let set = RecordSet::new(vec![
            record(&[("a", Value::from("1")), ("b", Value::from("2"))]),
            record(&[("a", Value::from("3"))]),
        ]);
        assert_eq!(write_csv(&set, &reject()).unwrap(), "a,b\n1,2\n3,\n");
    }

    #[test]
    fn test_empty_set_writes_nothing() {
        assert_eq!(
            write_csv(&RecordSet::default(), &CsvWriteOptions::default()).unwrap(),
            ""
        );
    }
}
