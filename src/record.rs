//! Whole-record encode/decode over a tokenized row.
//!
//! The schema layer describes each column with a [`ColumnSpec`]; this module
//! only applies the cell codec column by column and tags any failure with the
//! column name, leaving the skip-or-abort decision to the caller.

use crate::decoder::decode;
use crate::dialect::Dialect;
use crate::encoder::encode;
use crate::error::RecordError;
use crate::value::{Attribute, ValueKind};

/// How one column of the record maps to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ValueKind,
    pub multivalued: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ValueKind, multivalued: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            multivalued,
        }
    }

    /// Single-valued columns never split, whatever the dialect says.
    fn delimiter<'a>(&self, dialect: &'a Dialect) -> Option<&'a str> {
        if self.multivalued {
            dialect.multivalue_delimiter()
        } else {
            None
        }
    }
}

/// Decode every field of a tokenized row into an attribute.
///
/// Attributes come back in column order; a blank field yields an attribute
/// with no values.
pub fn decode_record<S: AsRef<str>>(
    fields: &[S],
    columns: &[ColumnSpec],
    dialect: &Dialect,
) -> Result<Vec<Attribute>, RecordError> {
    if fields.len() != columns.len() {
        return Err(RecordError::FieldCount {
            expected: columns.len(),
            found: fields.len(),
        });
    }

    fields
        .iter()
        .zip(columns)
        .map(|(field, column)| {
            let values = decode(field.as_ref(), column.kind, column.delimiter(dialect))
                .map_err(|source| RecordError::Decode {
                    column: column.name.clone(),
                    source,
                })?;
            Ok(Attribute::new(column.name.clone(), values))
        })
        .collect()
}

/// Encode attributes into one cell per column, in column order.
///
/// Columns without a matching attribute get an empty cell. An attribute
/// without a column is an error rather than being dropped.
pub fn encode_record(
    attributes: &[Attribute],
    columns: &[ColumnSpec],
    dialect: &Dialect,
) -> Result<Vec<String>, RecordError> {
    if let Some(unknown) = attributes
        .iter()
        .find(|a| !columns.iter().any(|c| c.name == a.name))
    {
        return Err(RecordError::UnknownAttribute {
            name: unknown.name.clone(),
        });
    }

    columns
        .iter()
        .map(|column| {
            let Some(attribute) = attributes.iter().find(|a| a.name == column.name) else {
                return Ok(String::new());
            };
            encode(&attribute.values, column.delimiter(dialect)).map_err(|source| {
                RecordError::Encode {
                    column: column.name.clone(),
                    source,
                }
            })
        })
        .collect()
}
