//! Typed attribute values and the opaque secret containers.

use secrecy::{ExposeSecret, SecretSlice, SecretString};
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// The type a cell decodes to, as supplied by the schema layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    PlainText,
    SecretText,
    SecretBinary,
}

/// An opaque character sequence, e.g. a password.
///
/// The payload is zeroized on drop and can only be read inside
/// [`SecretText::access`]; there is deliberately no getter returning an owned
/// copy.
pub struct SecretText(SecretString);

impl SecretText {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Runs `f` with a borrow of the payload. The borrow can't escape the call.
    pub fn access<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(self.0.expose_secret())
    }
}

impl Clone for SecretText {
    fn clone(&self) -> Self {
        self.access(|s| Self::new(s))
    }
}

/// Compares payloads, not identity.
impl PartialEq for SecretText {
    fn eq(&self, other: &Self) -> bool {
        self.access(|a| other.access(|b| a == b))
    }
}

impl Eq for SecretText {}

impl fmt::Debug for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretText").field(&REDACTED).finish()
    }
}

impl From<String> for SecretText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// An opaque byte sequence, e.g. a binary key.
pub struct SecretBinary(SecretSlice<u8>);

impl SecretBinary {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(SecretSlice::from(bytes.into()))
    }

    /// Runs `f` with a borrow of the raw bytes.
    pub fn access<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.0.expose_secret())
    }
}

impl Clone for SecretBinary {
    fn clone(&self) -> Self {
        self.access(|b| Self::new(b))
    }
}

impl PartialEq for SecretBinary {
    fn eq(&self, other: &Self) -> bool {
        self.access(|a| other.access(|b| a == b))
    }
}

impl Eq for SecretBinary {}

impl fmt::Debug for SecretBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretBinary").field(&REDACTED).finish()
    }
}

impl From<Vec<u8>> for SecretBinary {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// One value of an attribute.
///
/// Values of different variants never compare equal, even if the payloads
/// match: `PlainText("a") != SecretText("a")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    PlainText(String),
    SecretText(SecretText),
    SecretBinary(SecretBinary),
}

impl AttributeValue {
    pub fn plain(value: impl Into<String>) -> Self {
        AttributeValue::PlainText(value.into())
    }

    pub fn secret_text(value: impl Into<String>) -> Self {
        AttributeValue::SecretText(SecretText::new(value))
    }

    pub fn secret_binary(bytes: impl Into<Vec<u8>>) -> Self {
        AttributeValue::SecretBinary(SecretBinary::new(bytes))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::PlainText(_) => ValueKind::PlainText,
            AttributeValue::SecretText(_) => ValueKind::SecretText,
            AttributeValue::SecretBinary(_) => ValueKind::SecretBinary,
        }
    }

    /// The plain text, or `None` for secrets.
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            AttributeValue::PlainText(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::plain(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::PlainText(value)
    }
}

impl From<SecretText> for AttributeValue {
    fn from(value: SecretText) -> Self {
        AttributeValue::SecretText(value)
    }
}

impl From<SecretBinary> for AttributeValue {
    fn from(value: SecretBinary) -> Self {
        AttributeValue::SecretBinary(value)
    }
}

/// A named attribute with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<AttributeValue>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
