//! Attribute values to raw cell encoder

use crate::common::active_delimiter;
use crate::error::EncodeError;
use crate::value::{Attribute, AttributeValue};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode a value list into one raw cell.
///
/// An empty list gives an empty cell. More than one value needs a multivalue
/// delimiter; without one the cell could not be split back apart, so this
/// fails instead of joining silently.
///
/// Secret payloads are read through a single scoped access each and written
/// straight into the output; binary secrets are base64 encoded.
pub fn encode(
    values: &[AttributeValue],
    multivalue_delimiter: Option<&str>,
) -> Result<String, EncodeError> {
    let delimiter = active_delimiter(multivalue_delimiter);
    if values.len() > 1 && delimiter.is_none() {
        return Err(EncodeError::MissingMultivalueDelimiter {
            count: values.len(),
        });
    }

    let mut encoder = Encoder::new(delimiter.unwrap_or_default());
    for value in values {
        encoder.push_value(value);
    }

    tracing::trace!(values = values.len(), "Encoded cell");
    Ok(encoder.output)
}

/// Encode an attribute's values; an absent attribute is an empty cell.
pub fn encode_attribute(
    attribute: Option<&Attribute>,
    multivalue_delimiter: Option<&str>,
) -> Result<String, EncodeError> {
    match attribute {
        Some(attribute) => encode(&attribute.values, multivalue_delimiter),
        None => Ok(String::new()),
    }
}

struct Encoder<'a> {
    delimiter: &'a str,
    output: String,
    first: bool,
}

impl<'a> Encoder<'a> {
    fn new(delimiter: &'a str) -> Self {
        Self {
            delimiter,
            output: String::new(),
            first: true,
        }
    }

    fn push_value(&mut self, value: &AttributeValue) {
        if !self.first {
            self.output.push_str(self.delimiter);
        }
        self.first = false;

        match value {
            AttributeValue::PlainText(text) => self.output.push_str(text),
            AttributeValue::SecretText(secret) => {
                secret.access(|text| self.output.push_str(text));
            }
            AttributeValue::SecretBinary(secret) => {
                secret.access(|bytes| STANDARD.encode_string(bytes, &mut self.output));
            }
        }
    }
}
