//! Resolution of format configuration into a validated dialect.
//!
//! A [`DialectConfig`] is the loosely typed configuration as it arrives from
//! outside (strings for character fields, a string for the quote mode). A
//! [`Dialect`] is the validated, immutable result that drives the tokenizer
//! and supplies the multivalue delimiter to the codec.

use crate::common::active_delimiter;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quoting policy applied by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteMode {
    /// Quote every field.
    All,
    /// Quote only fields containing special characters.
    Minimal,
    /// Quote every field that isn't a number.
    NonNumeric,
    /// Never quote; rely on the escape character.
    None,
}

impl QuoteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteMode::All => "ALL",
            QuoteMode::Minimal => "MINIMAL",
            QuoteMode::NonNumeric => "NON_NUMERIC",
            QuoteMode::None => "NONE",
        }
    }
}

impl FromStr for QuoteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(QuoteMode::All),
            "MINIMAL" => Ok(QuoteMode::Minimal),
            "NON_NUMERIC" => Ok(QuoteMode::NonNumeric),
            "NONE" => Ok(QuoteMode::None),
            other => Err(ConfigError::InvalidEnumValue {
                field: "quoteMode",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw format configuration, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialectConfig {
    /// Required, exactly one character
    pub field_delimiter: Option<String>,
    pub quote: Option<String>,
    pub escape: Option<String>,
    pub comment_marker: Option<String>,
    /// Separator between values packed into one cell
    pub multivalue_delimiter: Option<String>,
    pub ignore_empty_lines: bool,
    pub ignore_surrounding_spaces: bool,
    pub trim: bool,
    pub trailing_delimiter: bool,
    /// One of `ALL`, `MINIMAL`, `NON_NUMERIC`, `NONE`
    pub quote_mode: String,
    pub record_separator: String,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            field_delimiter: Some(",".to_string()),
            quote: Some("\"".to_string()),
            escape: Some("\\".to_string()),
            comment_marker: None,
            multivalue_delimiter: None,
            ignore_empty_lines: true,
            ignore_surrounding_spaces: false,
            trim: false,
            trailing_delimiter: false,
            quote_mode: QuoteMode::All.as_str().to_string(),
            record_separator: "\r\n".to_string(),
        }
    }
}

impl DialectConfig {
    /// Parse a JSON configuration document.
    ///
    /// Missing keys take the values of [`DialectConfig::default`], so an
    /// absent `quote` or `escape` key means `"` or `\` respectively. Only an
    /// explicit `null` leaves an optional character unset when resolving.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn resolve(&self) -> Result<Dialect, ConfigError> {
        resolve(self)
    }
}

/// Validated, immutable tokenizer/writer rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    delimiter: char,
    quote: Option<char>,
    escape: Option<char>,
    comment_marker: Option<char>,
    multivalue_delimiter: Option<String>,
    ignore_empty_lines: bool,
    ignore_surrounding_spaces: bool,
    trim: bool,
    trailing_delimiter: bool,
    quote_mode: QuoteMode,
    record_separator: String,
}

impl Dialect {
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn quote(&self) -> Option<char> {
        self.quote
    }

    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    pub fn comment_marker(&self) -> Option<char> {
        self.comment_marker
    }

    /// `None` when unset or configured as an empty string.
    pub fn multivalue_delimiter(&self) -> Option<&str> {
        self.multivalue_delimiter.as_deref()
    }

    pub fn ignore_empty_lines(&self) -> bool {
        self.ignore_empty_lines
    }

    pub fn ignore_surrounding_spaces(&self) -> bool {
        self.ignore_surrounding_spaces
    }

    pub fn trim(&self) -> bool {
        self.trim
    }

    pub fn trailing_delimiter(&self) -> bool {
        self.trailing_delimiter
    }

    pub fn quote_mode(&self) -> QuoteMode {
        self.quote_mode
    }

    pub fn record_separator(&self) -> &str {
        &self.record_separator
    }
}

/// Validate `config` and build the dialect it describes.
///
/// Absent optional characters stay unset; they are never replaced by a
/// default character here.
pub fn resolve(config: &DialectConfig) -> Result<Dialect, ConfigError> {
    let delimiter = match config.field_delimiter.as_deref() {
        None | Some("") => return Err(ConfigError::MissingDelimiter),
        Some(value) => resolve_character("fieldDelimiter", Some(value))?
            .ok_or(ConfigError::MissingDelimiter)?,
    };

    let dialect = Dialect {
        delimiter,
        quote: resolve_character("quote", config.quote.as_deref())?,
        escape: resolve_character("escape", config.escape.as_deref())?,
        comment_marker: resolve_character("commentMarker", config.comment_marker.as_deref())?,
        multivalue_delimiter: active_delimiter(config.multivalue_delimiter.as_deref())
            .map(str::to_string),
        ignore_empty_lines: config.ignore_empty_lines,
        ignore_surrounding_spaces: config.ignore_surrounding_spaces,
        trim: config.trim,
        trailing_delimiter: config.trailing_delimiter,
        quote_mode: config.quote_mode.parse()?,
        record_separator: config.record_separator.clone(),
    };

    tracing::debug!(
        delimiter = ?dialect.delimiter,
        quote = ?dialect.quote,
        escape = ?dialect.escape,
        comment_marker = ?dialect.comment_marker,
        multivalue_delimiter = ?dialect.multivalue_delimiter,
        quote_mode = %dialect.quote_mode,
        "Resolved CSV dialect"
    );

    Ok(dialect)
}

/// Turn an optional one-character string into a character.
///
/// `None` stays `None`; anything that is not exactly one character long
/// (counted in chars, not bytes) is rejected.
pub fn resolve_character(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<char>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(ConfigError::InvalidCharacterField {
            field,
            length: value.chars().count(),
        }),
    }
}
