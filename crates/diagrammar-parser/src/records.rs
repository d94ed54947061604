//! Delimited-record tokenizer used by the sankey dialect.
//!
//! A record is a comma-separated list of fields. A field wrapped in `"` may
//! contain commas, and `""` inside it stands for one literal quote. Unquoted
//! fields are trimmed.

use std::borrow::Cow;

use thiserror::Error;

/// Failure to split a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A quoted field has no closing quote. `offset` is the opening quote.
    #[error("unterminated quoted field")]
    UnterminatedQuote { offset: usize },

    /// Text follows the closing quote of a field. `offset` is its first byte.
    #[error("unexpected character after quoted field")]
    TrailingCharacters { offset: usize },
}

impl RecordError {
    /// Byte offset of the problem within the record.
    pub fn offset(&self) -> usize {
        match *self {
            RecordError::UnterminatedQuote { offset } => offset,
            RecordError::TrailingCharacters { offset } => offset,
        }
    }
}

/// Split one record into its fields.
///
/// ```
/// use diagrammar_parser::records::split_record;
///
/// let fields = split_record(r#""A ""Company""",B,10"#).unwrap();
/// assert_eq!(fields, vec![r#"A "Company""#, "B", "10"]);
/// ```
pub fn split_record(record: &str) -> Result<Vec<String>, RecordError> {
    let mut fields = Vec::new();
    let mut rest = record;

    loop {
        let start = record.len() - rest.len();
        let trimmed = rest.trim_start();
        if let Some(body) = trimmed.strip_prefix('"') {
            let quote_at = record.len() - trimmed.len();
            let (field, after) = take_quoted(body).ok_or(RecordError::UnterminatedQuote {
                offset: quote_at,
            })?;
            fields.push(field);

            let after_ws = after.trim_start();
            match after_ws.strip_prefix(',') {
                Some(next) => rest = next,
                None if after_ws.is_empty() => return Ok(fields),
                None => {
                    return Err(RecordError::TrailingCharacters {
                        offset: record.len() - after_ws.len(),
                    });
                }
            }
        } else {
            match rest.find(',') {
                Some(comma) => {
                    fields.push(rest[..comma].trim().to_string());
                    rest = &rest[comma + 1..];
                }
                None => {
                    fields.push(record[start..].trim().to_string());
                    return Ok(fields);
                }
            }
        }
    }
}

/// Read a quoted field body up to its closing quote.
fn take_quoted(body: &str) -> Option<(String, &str)> {
    let mut field = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            field.push(c);
            continue;
        }
        if body[i + 1..].starts_with('"') {
            field.push('"');
            chars.next();
        } else {
            return Some((field, &body[i + 1..]));
        }
    }
    None
}

/// Write `field` so that [`split_record`] reads it back unchanged.
pub fn write_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field.is_empty()
        || field.contains([',', '"'])
        || field.trim() != field;
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_field_keeps_commas() {
        let fields = split_record(r#""A, Inc",B,10"#).unwrap();
        assert_eq!(fields, vec!["A, Inc", "B", "10"]);
    }

    #[test]
    fn test_doubled_quote_unescapes() {
        let fields = split_record(r#""A ""Company""",B,10"#).unwrap();
        assert_eq!(fields[0], r#"A "Company""#);
    }

    #[test]
    fn test_unquoted_fields_are_trimmed() {
        let fields = split_record("  A ,  B  , 10 ").unwrap();
        assert_eq!(fields, vec!["A", "B", "10"]);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(split_record("a,,b").unwrap(), vec!["a", "", "b"]);
        assert_eq!(split_record("").unwrap(), vec![""]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = split_record(r#"A,"B,10"#).unwrap_err();
        assert_eq!(err, RecordError::UnterminatedQuote { offset: 2 });
    }

    #[test]
    fn test_trailing_characters_after_quote() {
        let err = split_record(r#""A"x,B"#).unwrap_err();
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn test_write_field_quotes_when_needed() {
        assert_eq!(write_field("plain"), "plain");
        assert_eq!(write_field("A, Inc"), r#""A, Inc""#);
        assert_eq!(write_field(r#"A "B""#), r#""A ""B""""#);
        assert_eq!(write_field(" padded"), r#"" padded""#);
    }
}
