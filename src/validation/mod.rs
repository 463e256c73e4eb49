//! Flat-record shape validation
//!
//! JSON input is parsed into an untyped tree first and only becomes a
//! [`crate::record::RecordSet`] once it passes the checks in [`shape`].

pub mod shape;

pub use shape::{into_record_set, validate_shape, ShapeValidator, ValidationOutcome};
