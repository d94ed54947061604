//! Error adapter for converting DiagrammarError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors carry
//! a line and column; the adapter turns them into a byte span of the source so
//! the offending statement is underlined.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use diagrammar::DiagrammarError;
use diagrammar_parser::ParseError;

/// Adapter for a single parse error and the text it was raised on.
pub struct ParseErrorAdapter<'a> {
    err: &'a ParseError,
    src: &'a str,
}

impl<'a> ParseErrorAdapter<'a> {
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.err.message)
    }
}

impl std::error::Error for ParseErrorAdapter<'_> {}

impl MietteDiagnostic for ParseErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.code.as_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.code.description()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = span_at(self.src, self.err.line, self.err.column);
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`DiagrammarError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a DiagrammarError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DiagrammarError::Io(_) => "diagrammar::io",
            DiagrammarError::UnknownDialect => "diagrammar::dialect",
            DiagrammarError::Parse { .. } => return None,
            DiagrammarError::FlowValidation(_)
            | DiagrammarError::ClassValidation(_)
            | DiagrammarError::SequenceValidation(_)
            | DiagrammarError::StateValidation(_) => "diagrammar::validation",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            DiagrammarError::UnknownDialect => Some(Box::new(
                "start the file with a diagram header such as `flowchart TD`, or pass --dialect",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with a source location.
    Parse(ParseErrorAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Wrap a [`DiagrammarError`] for rendering.
pub fn to_reportable(err: &DiagrammarError) -> Reportable<'_> {
    match err {
        DiagrammarError::Parse { err, src } => Reportable::Parse(ParseErrorAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Byte span from the 1-based `line` and `column` to the end of that line.
///
/// Columns count characters. Positions past the end of the source clamp to
/// its end.
fn span_at(src: &str, line: usize, column: usize) -> SourceSpan {
    let mut line_start = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let body = text.trim_end_matches(['\n', '\r']);
            let offset = body
                .char_indices()
                .nth(column.saturating_sub(1))
                .map_or(body.len(), |(i, _)| i);
            return SourceSpan::new((line_start + offset).into(), body.len() - offset);
        }
        line_start += text.len();
    }
    SourceSpan::new(src.len().into(), 0)
}

#[cfg(test)]
mod tests {
    use diagrammar_parser::ErrorCode;

    use super::*;

    #[test]
    fn test_span_at_counts_characters() {
        let src = "flowchart LR\n  é --> ?\nend\n";
        let span = span_at(src, 2, 4);
        // "  é" is four bytes
        assert_eq!(span.offset(), 13 + 4);
        assert_eq!(&src[span.offset()..span.offset() + span.len()], " --> ?");
    }

    #[test]
    fn test_span_at_clamps() {
        let src = "pie\n";
        assert_eq!(span_at(src, 1, 99).offset(), 3);
        assert_eq!(span_at(src, 7, 1).offset(), src.len());
    }

    #[test]
    fn test_parse_error_is_labelled() {
        let src = "sequenceDiagram\n    A-x\n";
        let err = DiagrammarError::new_parse_error(
            ParseError::new(ErrorCode::E100, 2, 5, "unexpected statement `A-x`"),
            src,
        );

        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "unexpected statement `A-x`");
        assert_eq!(reportable.code().unwrap().to_string(), "E100");

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 20);
        assert_eq!(labels[0].len(), 3);
    }

    #[test]
    fn test_non_parse_error() {
        let err = DiagrammarError::UnknownDialect;

        match to_reportable(&err) {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "unknown diagram dialect");
                assert_eq!(e.code().unwrap().to_string(), "diagrammar::dialect");
            }
            Reportable::Parse(_) => panic!("Expected Error"),
        }
    }
}
