//! Error types for dialect resolution and the cell codec.
//!
//! None of these errors ever carry a secret payload: decode failures name the
//! segment position, not its content.

use thiserror::Error;

/// The configuration could not be turned into a [`Dialect`](crate::Dialect).
///
/// Configuration errors are fatal for a whole run: no record can be processed
/// safely without a valid dialect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The required field delimiter is absent or empty.
    #[error("field delimiter is not configured")]
    MissingDelimiter,
    /// A character-typed field does not hold exactly one character.
    #[error("can't use `{field}` as a character, illegal string size: {length}, should be 1")]
    InvalidCharacterField { field: &'static str, length: usize },
    /// An enum-typed field holds an unrecognized name.
    #[error("invalid value `{value}` for `{field}`")]
    InvalidEnumValue { field: &'static str, value: String },
    /// The `csv` tokenizer only understands single-byte control characters.
    #[error("`{field}` must be an ASCII character for the csv tokenizer, got {ch:?}")]
    NonAsciiCharacter { field: &'static str, ch: char },
    /// The record separator can't be expressed as a `csv` terminator.
    #[error("unsupported record separator {0:?}")]
    UnsupportedRecordSeparator(String),
    /// The option can't be honored by the `csv` tokenizer without losing data.
    #[error("`{option}` is not supported by the csv tokenizer: {reason}")]
    UnsupportedOption {
        option: &'static str,
        reason: &'static str,
    },
    /// The configuration document itself is malformed.
    #[error("configuration parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// A value list could not be written into a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Several values but nothing to separate them with.
    #[error("multivalue delimiter not defined, can't encode {count} values into one cell")]
    MissingMultivalueDelimiter { count: usize },
}

/// A cell could not be turned back into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A secret-binary segment is not valid base64.
    #[error("segment {segment} is not valid base64")]
    InvalidBinaryEncoding { segment: usize },
}

/// A codec failure attributed to the column it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The row does not have one field per configured column.
    #[error("record has {found} fields, expected {expected}")]
    FieldCount { expected: usize, found: usize },
    /// An attribute has no column to be written to.
    #[error("attribute `{name}` has no column in the record")]
    UnknownAttribute { name: String },
    #[error("column `{column}`: {source}")]
    Encode {
        column: String,
        #[source]
        source: EncodeError,
    },
    #[error("column `{column}`: {source}")]
    Decode {
        column: String,
        #[source]
        source: DecodeError,
    },
}

impl RecordError {
    /// Name of the offending column, if the error is tied to one.
    pub fn column(&self) -> Option<&str> {
        match self {
            RecordError::FieldCount { .. } | RecordError::UnknownAttribute { .. } => None,
            RecordError::Encode { column, .. } | RecordError::Decode { column, .. } => {
                Some(column)
            }
        }
    }
}
