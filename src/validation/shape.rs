//! Checks that a parsed JSON value is an array of flat objects

use serde_json::{Map, Value};

use crate::error::{ConversionError, ConversionResult};
use crate::parser::json::json_type_name;
use crate::record::{self, Record, RecordSet};

/// Reason reported when the document is not an array
pub const NOT_AN_ARRAY: &str = "Top level JSON should be an array.";

/// Reason reported when an element of the array is not an object
pub const NOT_AN_OBJECT_ARRAY: &str = "JSON should be an array of objects.";

/// Result of a shape check. Only the first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => Some(reason),
        }
    }

    pub fn into_result(self) -> ConversionResult<()> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(reason) => Err(ConversionError::validation(reason)),
        }
    }
}

/// Shape validator for parsed JSON
///
/// Rules are checked in precedence order over the whole document:
/// 1. the value is an array
/// 2. every element is an object
/// 3. every property of every object is a string, number or boolean
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapeValidator;

impl ShapeValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, value: &Value) -> ValidationOutcome {
        let Value::Array(elements) = value else {
            return ValidationOutcome::Invalid(NOT_AN_ARRAY.to_string());
        };

        if !elements.iter().all(Value::is_object) {
            return ValidationOutcome::Invalid(NOT_AN_OBJECT_ARRAY.to_string());
        }

        for object in elements.iter().filter_map(Value::as_object) {
            if let Some(bad) = object.values().find(|v| !is_primitive(v)) {
                return ValidationOutcome::Invalid(non_primitive_reason(bad));
            }
        }

        ValidationOutcome::Valid
    }
}

/// Validate a parsed JSON value against the flat-record shape
pub fn validate_shape(value: &Value) -> ValidationOutcome {
    ShapeValidator::new().validate(value)
}

/// Validate and convert in one step; only a valid tree becomes a record set
pub fn into_record_set(value: Value) -> ConversionResult<RecordSet> {
    validate_shape(&value).into_result()?;

    let Value::Array(elements) = value else {
        return Err(ConversionError::internal("validated JSON is not an array"));
    };

    let records = elements
        .into_iter()
        .map(|element| match element {
            Value::Object(object) => object_to_record(object),
            other => Err(ConversionError::internal(format!(
                "validated JSON element is {}",
                json_type_name(&other)
            ))),
        })
        .collect::<ConversionResult<Vec<Record>>>()?;

    tracing::debug!(records = records.len(), "JSON input has a flat record shape");
    Ok(RecordSet::new(records))
}

fn object_to_record(object: Map<String, Value>) -> ConversionResult<Record> {
    object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => record::Value::String(s),
                Value::Number(n) => record::Value::Number(n),
                Value::Bool(b) => record::Value::Bool(b),
                other => {
                    return Err(ConversionError::internal(format!(
                        "validated property '{}' is {}",
                        key,
                        json_type_name(&other)
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn non_primitive_reason(value: &Value) -> String {
    format!(
        "Properties on the objects should be primitive types, got {}.",
        json_type_name(value)
    )
}
