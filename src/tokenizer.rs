//! Binding from a resolved [`Dialect`] to the `csv` crate's reader and writer
//! builders.
//!
//! The `csv` crate only works with single-byte control characters, so every
//! configured character has to be ASCII here even though [`Dialect`] itself
//! accepts any `char`. Options the crate can't honor without losing or
//! inventing fields are rejected with [`ConfigError::UnsupportedOption`]:
//! keeping empty lines, writing without quotes, and a trailing delimiter
//! under any quote mode but `MINIMAL`. The trailing delimiter itself is
//! handled by [`record_fields`] and [`write_row`].

use crate::dialect::{Dialect, QuoteMode};
use crate::error::ConfigError;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, Writer, WriterBuilder};
use std::io;

impl Dialect {
    /// A reader builder configured for this dialect.
    pub fn reader_builder(&self) -> Result<ReaderBuilder, ConfigError> {
        if !self.ignore_empty_lines() {
            return Err(ConfigError::UnsupportedOption {
                option: "ignoreEmptyLines",
                reason: "empty lines are always skipped",
            });
        }

        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(ascii("fieldDelimiter", self.delimiter())?)
            .comment(ascii_opt("commentMarker", self.comment_marker())?)
            .escape(ascii_opt("escape", self.escape())?)
            .double_quote(self.escape().is_none())
            .terminator(read_terminator(self.record_separator())?)
            .trim(self.trim_policy());

        match ascii_opt("quote", self.quote())? {
            Some(quote) => builder.quote(quote).quoting(true),
            None => builder.quoting(false),
        };

        Ok(builder)
    }

    /// A writer builder configured for this dialect.
    ///
    /// The writer never escapes delimiters outside quotes, so a dialect
    /// without a quote character or with `NONE` quoting is rejected.
    pub fn writer_builder(&self) -> Result<WriterBuilder, ConfigError> {
        let Some(quote) = ascii_opt("quote", self.quote())? else {
            return Err(ConfigError::UnsupportedOption {
                option: "quote",
                reason: "fields containing the delimiter can't be written unquoted",
            });
        };
        if self.quote_mode() == QuoteMode::None {
            return Err(ConfigError::UnsupportedOption {
                option: "quoteMode",
                reason: "fields containing the delimiter can't be written unquoted",
            });
        }
        // only MINIMAL leaves the empty trailing field bare
        if self.trailing_delimiter() && self.quote_mode() != QuoteMode::Minimal {
            return Err(ConfigError::UnsupportedOption {
                option: "trailingDelimiter",
                reason: "requires MINIMAL quoting",
            });
        }

        let mut builder = WriterBuilder::new();
        builder
            .delimiter(ascii("fieldDelimiter", self.delimiter())?)
            .terminator(write_terminator(self.record_separator())?)
            .quote(quote)
            .quote_style(quote_style(self.quote_mode()));

        match ascii_opt("escape", self.escape())? {
            Some(escape) => builder.escape(escape).double_quote(false),
            None => builder.double_quote(true),
        };

        Ok(builder)
    }

    fn trim_policy(&self) -> Trim {
        if self.trim() || self.ignore_surrounding_spaces() {
            Trim::All
        } else {
            Trim::None
        }
    }
}

/// Fields of a read record, minus the empty field a trailing delimiter leaves
/// at the end of the line.
pub fn record_fields<'r>(record: &'r StringRecord, dialect: &Dialect) -> Vec<&'r str> {
    let mut fields: Vec<&str> = record.iter().collect();
    if dialect.trailing_delimiter() && fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}

/// Write one row, ending it with the delimiter when the dialect asks for it.
///
/// `writer` must come from [`Dialect::writer_builder`] for the same dialect.
pub fn write_row<W, S>(writer: &mut Writer<W>, dialect: &Dialect, fields: &[S]) -> csv::Result<()>
where
    W: io::Write,
    S: AsRef<[u8]>,
{
    let trailing: &[u8] = b"";
    let extra = (dialect.trailing_delimiter() && !fields.is_empty()).then_some(trailing);
    writer.write_record(fields.iter().map(AsRef::<[u8]>::as_ref).chain(extra))
}

fn quote_style(mode: QuoteMode) -> QuoteStyle {
    match mode {
        QuoteMode::All => QuoteStyle::Always,
        QuoteMode::Minimal => QuoteStyle::Necessary,
        QuoteMode::NonNumeric => QuoteStyle::NonNumeric,
        // rejected before the builder is configured
        QuoteMode::None => QuoteStyle::Never,
    }
}

fn ascii(field: &'static str, ch: char) -> Result<u8, ConfigError> {
    u8::try_from(ch)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(ConfigError::NonAsciiCharacter { field, ch })
}

fn ascii_opt(field: &'static str, ch: Option<char>) -> Result<Option<u8>, ConfigError> {
    ch.map(|ch| ascii(field, ch)).transpose()
}

fn read_terminator(separator: &str) -> Result<Terminator, ConfigError> {
    match separator {
        // CRLF on the read side accepts any of \r, \n and \r\n
        "" | "\r\n" | "\n" | "\r" => Ok(Terminator::CRLF),
        other => single_byte_terminator(other),
    }
}

fn write_terminator(separator: &str) -> Result<Terminator, ConfigError> {
    match separator {
        "\r\n" => Ok(Terminator::CRLF),
        other => single_byte_terminator(other),
    }
}

fn single_byte_terminator(separator: &str) -> Result<Terminator, ConfigError> {
    match separator.as_bytes() {
        [byte] if byte.is_ascii() => Ok(Terminator::Any(*byte)),
        _ => Err(ConfigError::UnsupportedRecordSeparator(
            separator.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{resolve, DialectConfig};

    fn dialect(config: DialectConfig) -> Dialect {
        resolve(&config).unwrap()
    }

    fn read_all(dialect: &Dialect, input: &str) -> Vec<Vec<String>> {
        dialect
            .reader_builder()
            .unwrap()
            .has_headers(false)
            .from_reader(input.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    fn write_all(dialect: &Dialect, rows: &[&[&str]]) -> String {
        let mut writer = dialect.writer_builder().unwrap().from_writer(vec![]);
        for row in rows {
            writer.write_record(*row).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_read_with_escape_and_comment() {
        let d = dialect(DialectConfig {
            field_delimiter: Some(";".to_string()),
            comment_marker: Some("#".to_string()),
            ..Default::default()
        });
        let rows = read_all(&d, "# header comment\nalice;\"a\\\"b\"\n\nbob;x\n");
        assert_eq!(
            rows,
            vec![
                vec!["alice".to_string(), "a\"b".to_string()],
                vec!["bob".to_string(), "x".to_string()],
            ]
        );
    }

    #[test]
    fn test_read_trims_when_configured() {
        let d = dialect(DialectConfig {
            trim: true,
            ..Default::default()
        });
        assert_eq!(read_all(&d, " a , b \n"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_write_quote_modes() {
        let all = dialect(DialectConfig::default());
        assert_eq!(write_all(&all, &[&["a", "1"]]), "\"a\",\"1\"\r\n");

        let minimal = dialect(DialectConfig {
            quote_mode: "MINIMAL".to_string(),
            record_separator: "\n".to_string(),
            ..Default::default()
        });
        assert_eq!(write_all(&minimal, &[&["a", "b,c"]]), "a,\"b,c\"\n");

        let non_numeric = dialect(DialectConfig {
            quote_mode: "NON_NUMERIC".to_string(),
            record_separator: "\n".to_string(),
            ..Default::default()
        });
        assert_eq!(write_all(&non_numeric, &[&["a", "1"]]), "\"a\",1\n");
    }

    #[test]
    fn test_non_ascii_character_rejected() {
        let d = dialect(DialectConfig {
            field_delimiter: Some("§".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            d.reader_builder(),
            Err(ConfigError::NonAsciiCharacter {
                field: "fieldDelimiter",
                ch: '§'
            })
        ));
    }

    #[test]
    fn test_unsupported_record_separator() {
        let d = dialect(DialectConfig {
            record_separator: "||".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            d.writer_builder(),
            Err(ConfigError::UnsupportedRecordSeparator(_))
        ));
    }

    #[test]
    fn test_writer_without_quoting_rejected() {
        let no_quote = dialect(DialectConfig {
            quote: None,
            quote_mode: "MINIMAL".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            no_quote.writer_builder(),
            Err(ConfigError::UnsupportedOption { option: "quote", .. })
        ));

        let mode_none = dialect(DialectConfig {
            quote: None,
            quote_mode: "NONE".to_string(),
            ..Default::default()
        });
        assert!(mode_none.writer_builder().is_err());

        let quote_but_mode_none = dialect(DialectConfig {
            quote_mode: "NONE".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            quote_but_mode_none.writer_builder(),
            Err(ConfigError::UnsupportedOption {
                option: "quoteMode",
                ..
            })
        ));
    }

    #[test]
    fn test_field_with_delimiter_survives_write_and_read() {
        let d = dialect(DialectConfig {
            quote_mode: "MINIMAL".to_string(),
            record_separator: "\n".to_string(),
            ..Default::default()
        });
        let written = write_all(&d, &[&["a,b", "c"]]);
        assert_eq!(written, "\"a,b\",c\n");
        assert_eq!(read_all(&d, &written), vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn test_keeping_empty_lines_rejected() {
        let d = dialect(DialectConfig {
            ignore_empty_lines: false,
            ..Default::default()
        });
        assert!(matches!(
            d.reader_builder(),
            Err(ConfigError::UnsupportedOption {
                option: "ignoreEmptyLines",
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_delimiter_needs_minimal_quoting() {
        let d = dialect(DialectConfig {
            trailing_delimiter: true,
            ..Default::default()
        });
        assert!(matches!(
            d.writer_builder(),
            Err(ConfigError::UnsupportedOption {
                option: "trailingDelimiter",
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_delimiter_write_and_read() {
        let d = dialect(DialectConfig {
            trailing_delimiter: true,
            quote_mode: "MINIMAL".to_string(),
            record_separator: "\n".to_string(),
            ..Default::default()
        });

        let mut writer = d.writer_builder().unwrap().from_writer(vec![]);
        write_row(&mut writer, &d, &["a", "b"]).unwrap();
        write_row(&mut writer, &d, &["c", ""]).unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(written, "a,b,\nc,,\n");

        let mut reader = d
            .reader_builder()
            .unwrap()
            .has_headers(false)
            .from_reader(written.as_bytes());
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| {
                let record = r.unwrap();
                record_fields(&record, &d)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", ""]]);
    }

    #[test]
    fn test_record_fields_without_trailing_delimiter() {
        let d = dialect(DialectConfig::default());
        let record = StringRecord::from(vec!["a", ""]);
        assert_eq!(record_fields(&record, &d), vec!["a", ""]);
    }
}
