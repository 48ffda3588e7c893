//! # csv_attrs
//!
//! Maps between flat delimited-text records and typed, possibly multi-valued
//! identity attributes.
//!
//! The crate resolves a format configuration into a [`Dialect`], encodes an
//! attribute's value list into a single cell and decodes it back, and applies
//! add/remove deltas to value lists. Reading and writing the actual file is
//! left to the caller; [`Dialect::reader_builder`] and
//! [`Dialect::writer_builder`] configure the `csv` crate for it.
//!
//! Secret values ([`SecretText`], [`SecretBinary`]) only expose their payload
//! through a scoped `access` closure and never show up in `Debug` output or
//! error messages.
//!
//! ## Example
//!
//! ```rust
//! use csv_attrs::{decode, encode, AttributeValue, DialectConfig, ValueKind};
//!
//! let config = DialectConfig::from_json(r#"{"fieldDelimiter": ";", "multivalueDelimiter": "|"}"#)
//!     .unwrap();
//! let dialect = config.resolve().unwrap();
//!
//! let values = vec![AttributeValue::plain("admins"), AttributeValue::plain("users")];
//! let cell = encode(&values, dialect.multivalue_delimiter()).unwrap();
//! assert_eq!(cell, "admins|users");
//!
//! let decoded = decode(&cell, ValueKind::PlainText, dialect.multivalue_delimiter()).unwrap();
//! assert_eq!(values, decoded);
//! ```

mod algebra;
mod common;
mod decoder;
mod dialect;
mod encoder;
mod error;
mod record;
mod time;
mod tokenizer;
mod value;

// Re-export public API
pub use algebra::{subtract, union, AttributeDelta};
pub use decoder::decode;
pub use dialect::{resolve, resolve_character, Dialect, DialectConfig, QuoteMode};
pub use encoder::{encode, encode_attribute};
pub use error::{ConfigError, DecodeError, EncodeError, RecordError};
pub use record::{decode_record, encode_record, ColumnSpec};
pub use time::{format_timestamp, DEFAULT_TIMESTAMP_PATTERN};
pub use tokenizer::{record_fields, write_row};
pub use value::{Attribute, AttributeValue, SecretBinary, SecretText, ValueKind};
