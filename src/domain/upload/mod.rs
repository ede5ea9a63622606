//! Decoding of uploaded menu files into untyped records.

use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod format;
pub mod parser;

pub use format::UploadFormat;
pub use parser::parse;

/// One uploaded row: field name to raw value, before validation.
///
/// CSV cells arrive as JSON strings; JSON uploads keep their original value types.
pub type RawRecord = serde_json::Map<String, JsonValue>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid file type. Only CSV and JSON files are allowed.")]
    UnsupportedFormat,

    #[error("Invalid {format} format: {reason}")]
    MalformedInput { format: UploadFormat, reason: String },
}

impl ParseError {
    pub(crate) fn malformed(format: UploadFormat, reason: impl Into<String>) -> Self {
        ParseError::MalformedInput {
            format,
            reason: reason.into(),
        }
    }
}
