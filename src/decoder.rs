//! Raw cell to attribute values decoder

use crate::common::{active_delimiter, is_blank};
use crate::error::DecodeError;
use crate::value::{AttributeValue, SecretBinary, SecretText, ValueKind};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode one raw cell into values of the `target` kind.
///
/// A blank cell is an empty list. Without a multivalue delimiter the whole
/// cell is a single value; with one, the cell is split on the literal
/// delimiter and blank segments are dropped. Segments keep their order and are
/// never trimmed.
pub fn decode(
    cell: &str,
    target: ValueKind,
    multivalue_delimiter: Option<&str>,
) -> Result<Vec<AttributeValue>, DecodeError> {
    if is_blank(cell) {
        return Ok(Vec::new());
    }

    let values = match active_delimiter(multivalue_delimiter) {
        None => vec![create_value(cell, target, 0)?],
        Some(delimiter) => cell
            .split(delimiter)
            .enumerate()
            .filter(|(_, segment)| !is_blank(segment))
            .map(|(i, segment)| create_value(segment, target, i))
            .collect::<Result<Vec<_>, _>>()?,
    };

    tracing::trace!(values = values.len(), kind = ?target, "Decoded cell");
    Ok(values)
}

/// `index` is the segment position inside the cell, reported on failure
/// instead of the segment itself.
fn create_value(
    raw: &str,
    target: ValueKind,
    index: usize,
) -> Result<AttributeValue, DecodeError> {
    Ok(match target {
        ValueKind::PlainText => AttributeValue::PlainText(raw.to_string()),
        ValueKind::SecretText => AttributeValue::SecretText(SecretText::new(raw)),
        ValueKind::SecretBinary => {
            let bytes = STANDARD
                .decode(raw)
                .map_err(|_| DecodeError::InvalidBinaryEncoding { segment: index })?;
            AttributeValue::SecretBinary(SecretBinary::new(bytes))
        }
    })
}
