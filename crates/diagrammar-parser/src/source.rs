//! Source normalisation shared by every dialect parser.
//!
//! [`prepare`] turns raw text into the significant lines of a diagram:
//!
//! - a leading `---` front-matter block is removed and its `title:` key kept,
//! - blank lines and `%%` comment lines are dropped,
//! - the dialect header is split off when present; when it is absent the
//!   whole text is treated as a body, exactly as if the keyword had been
//!   written on a line of its own.

use diagrammar_core::{DialectTag, Metadata};

use crate::{
    detect,
    error::{ErrorCode, ParseError},
    lexeme,
};

/// A significant source line with its position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'s> {
    /// 1-based line number.
    pub number: usize,
    /// Leading whitespace of the physical line.
    pub indent: &'s str,
    /// Characters on the physical line before `text`.
    pub offset: usize,
    /// The statement, with surrounding whitespace removed.
    pub text: &'s str,
}

impl<'s> Line<'s> {
    fn new(number: usize, raw: &'s str) -> Self {
        let trimmed = raw.trim_start();
        let indent = &raw[..raw.len() - trimmed.len()];
        Self {
            number,
            indent,
            offset: indent.chars().count(),
            text: trimmed.trim_end(),
        }
    }

    /// Indentation width in characters.
    pub fn indent_width(&self) -> usize {
        self.indent.chars().count()
    }

    /// 1-based column of the byte `offset` into `text`.
    pub fn column_at(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        let before = self.text.get(..offset).unwrap_or(self.text);
        self.offset + before.chars().count() + 1
    }

    /// Byte offset of `fragment` within `text`, or `0` if it is not a sub-slice.
    pub fn offset_of(&self, fragment: &str) -> usize {
        let start = self.text.as_ptr() as usize;
        let at = fragment.as_ptr() as usize;
        if at >= start && at <= start + self.text.len() {
            at - start
        } else {
            0
        }
    }

    pub fn error(&self, code: ErrorCode, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(code, self.number, self.column_at(offset), message)
    }

    /// Error for a line that matches no statement of the dialect.
    ///
    /// A line with an unbalanced quote is reported as an unterminated string
    /// at the last quote, since that is almost always the actual mistake.
    pub fn unexpected(&self) -> ParseError {
        if self.text.matches('"').count() % 2 == 1 {
            let offset = self.text.rfind('"').unwrap_or(0);
            return self.error(ErrorCode::E201, offset, "unterminated string");
        }
        self.error(
            ErrorCode::E100,
            0,
            format!("unexpected statement `{}`", self.text),
        )
    }

    /// Parse a numeric literal that appears in this line.
    pub fn number(&self, token: &str) -> Result<f64, ParseError> {
        let trimmed = token.trim();
        lexeme::parse_number(trimmed).ok_or_else(|| {
            self.error(
                ErrorCode::E200,
                self.offset_of(trimmed),
                format!("invalid number `{trimmed}`"),
            )
        })
    }

    /// Parse a numeric literal that must not be negative.
    pub fn non_negative(&self, token: &str) -> Result<f64, ParseError> {
        let value = self.number(token)?;
        if value < 0.0 {
            let trimmed = token.trim();
            return Err(self.error(
                ErrorCode::E202,
                self.offset_of(trimmed),
                format!("negative value `{trimmed}`"),
            ));
        }
        Ok(value)
    }
}

/// Significant lines of a diagram, split into header and body.
#[derive(Debug)]
pub(crate) struct Source<'s> {
    /// Title from the front-matter block.
    pub title: Option<String>,
    /// Rest of the header line after the keyword; `None` if the header was omitted.
    pub header: Option<Line<'s>>,
    pub body: Vec<Line<'s>>,
}

impl Source<'_> {
    /// Fresh metadata seeded with the front-matter title.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            title: self.title.clone(),
            ..Metadata::default()
        }
    }
}

/// Split `text` into front matter, header and body lines for `tag`.
pub(crate) fn prepare(text: &str, tag: DialectTag) -> Result<Source<'_>, ParseError> {
    let (title, mut lines) = significant_lines(text)?;

    let header = match lines.first() {
        Some(first) => detect::keyword_len(first.text, tag).map(|len| {
            let rest = first.text[len..].trim_start();
            let consumed = &first.text[..first.text.len() - rest.len()];
            Line {
                offset: first.offset + consumed.chars().count(),
                text: rest,
                ..*first
            }
        }),
        None => None,
    };
    if header.is_some() {
        lines.remove(0);
    }

    Ok(Source {
        title,
        header,
        body: lines,
    })
}

/// First significant line of `text`, trimmed.
pub(crate) fn first_significant_line(text: &str) -> Option<&str> {
    let (_, lines) = significant_lines(text).ok()?;
    lines.first().map(|line| line.text)
}

fn significant_lines(text: &str) -> Result<(Option<String>, Vec<Line<'_>>), ParseError> {
    let mut raw = text.lines().enumerate().map(|(i, raw)| Line::new(i + 1, raw));
    let mut title = None;
    let mut lines = Vec::new();

    // Front matter may only follow blank lines.
    while let Some(line) = raw.next() {
        if line.text.is_empty() {
            continue;
        }
        if line.text == "---" {
            title = front_matter(&line, &mut raw)?;
        } else if !is_comment(line.text) {
            lines.push(line);
        }
        break;
    }

    lines.extend(raw.filter(|line| !line.text.is_empty() && !is_comment(line.text)));
    Ok((title, lines))
}

fn front_matter<'s>(
    open: &Line<'s>,
    raw: &mut impl Iterator<Item = Line<'s>>,
) -> Result<Option<String>, ParseError> {
    let mut title = None;
    for line in raw {
        if line.text == "---" {
            return Ok(title);
        }
        if let Some(value) = line.text.strip_prefix("title:") {
            title = Some(unquote(value.trim()).to_string());
        }
    }
    Err(open.error(ErrorCode::E101, 0, "unterminated front matter"))
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}

fn is_comment(text: &str) -> bool {
    text.starts_with("%%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_splits_header_and_body() {
        let source = prepare("flowchart LR\n    A --> B\n", DialectTag::Flowchart).unwrap();
        let header = source.header.unwrap();
        assert_eq!(header.text, "LR");
        assert_eq!(header.column_at(0), 11);
        assert_eq!(source.body.len(), 1);
        assert_eq!(source.body[0].text, "A --> B");
        assert_eq!(source.body[0].number, 2);
        assert_eq!(source.body[0].column_at(0), 5);
    }

    #[test]
    fn test_prepare_without_header_keeps_every_line() {
        let source = prepare("\"A\" : 10\n\"B\" : 20", DialectTag::Pie).unwrap();
        assert!(source.header.is_none());
        assert_eq!(source.body.len(), 2);
    }

    #[test]
    fn test_front_matter_title_and_comments() {
        let text = "---\ntitle: \"Pets: adopted\"\n---\n%% comment\npie\n\n\"Dogs\" : 3\n";
        let source = prepare(text, DialectTag::Pie).unwrap();
        assert_eq!(source.title.as_deref(), Some("Pets: adopted"));
        assert!(source.header.is_some());
        assert_eq!(source.body.len(), 1);
        assert_eq!(source.body[0].number, 7);
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = prepare("---\ntitle: x\npie\n", DialectTag::Pie).unwrap_err();
        assert_eq!(err.code, ErrorCode::E101);
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_unexpected_reports_unbalanced_quote() {
        let source = prepare("pie\n  \"Dogs : 3\n", DialectTag::Pie).unwrap();
        let err = source.body[0].unexpected();
        assert_eq!(err.code, ErrorCode::E201);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_number_errors_point_at_token() {
        let source = prepare("pie\n\"A\" : -4\n\"B\" : x1\n", DialectTag::Pie).unwrap();
        let first = &source.body[0];
        let err = first.non_negative(&first.text[6..]).unwrap_err();
        assert_eq!((err.code, err.column), (ErrorCode::E202, 7));

        let second = &source.body[1];
        let err = second.number(&second.text[6..]).unwrap_err();
        assert_eq!(err.code, ErrorCode::E200);
    }
}
