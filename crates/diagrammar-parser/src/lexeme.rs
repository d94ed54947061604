//! Lexical building blocks shared by the statement grammars.
//!
//! Statements are parsed one line at a time: every grammar is a winnow parser
//! over the trimmed text of a [`Line`], and [`run`] requires it to consume the
//! whole line.

use diagrammar_core::text::{decode_entities, is_ident_char};
use winnow::{
    Parser,
    ascii::digit1,
    combinator::{alt, delimited, not, opt, terminated},
    error::{ContextError, ErrMode},
    token::{one_of, take_till, take_while},
};

use crate::{error::ParseError, source::Line};

pub(crate) type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Recoverable failure; the caller may try another alternative.
pub(crate) fn backtrack<O>() -> IResult<O> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Run `parser` over the whole of `line`.
pub(crate) fn run<'s, O, P>(line: &Line<'s>, mut parser: P) -> Result<O, ParseError>
where
    P: Parser<&'s str, O, ErrMode<ContextError>>,
{
    parser.parse(line.text).map_err(|_| line.unexpected())
}

/// Optional horizontal whitespace.
pub(crate) fn ws(input: &mut &str) -> IResult<()> {
    take_while(0.., [' ', '\t']).void().parse_next(input)
}

/// Mandatory horizontal whitespace.
pub(crate) fn ws1(input: &mut &str) -> IResult<()> {
    take_while(1.., [' ', '\t']).void().parse_next(input)
}

/// A bare identifier: letters, digits and `_`.
pub(crate) fn ident<'s>(input: &mut &'s str) -> IResult<&'s str> {
    take_while(1.., is_ident_char).parse_next(input)
}

/// An identifier that may also contain `-` (class names, ER entities).
pub(crate) fn name<'s>(input: &mut &'s str) -> IResult<&'s str> {
    take_while(1.., |c: char| is_ident_char(c) || c == '-').parse_next(input)
}

/// A `"..."` string with `#quot;` entities decoded.
pub(crate) fn quoted(input: &mut &str) -> IResult<String> {
    delimited('"', take_till(0.., '"'), '"')
        .map(decode_entities)
        .parse_next(input)
}

/// A keyword that is not immediately followed by an identifier character.
pub(crate) fn keyword<'s>(
    word: &'static str,
) -> impl Parser<&'s str, &'s str, ErrMode<ContextError>> {
    terminated(word, not(one_of(is_ident_char)))
}

/// A keyword followed by mandatory whitespace and a non-empty remainder.
pub(crate) fn keyword_rest<'s>(
    word: &'static str,
) -> impl Parser<&'s str, &'s str, ErrMode<ContextError>> {
    move |input: &mut &'s str| {
        (word, ws1).parse_next(input)?;
        rest_trimmed.verify(|s: &str| !s.is_empty()).parse_next(input)
    }
}

/// Everything left on the line, trimmed.
pub(crate) fn rest_trimmed<'s>(input: &mut &'s str) -> IResult<&'s str> {
    let rest = input.trim();
    *input = "";
    Ok(rest)
}

/// `-?digits(.digits)?` or `-?.digits`.
pub(crate) fn number_literal<'s>(input: &mut &'s str) -> IResult<&'s str> {
    (
        opt('-'),
        alt(((digit1, opt(('.', digit1))).void(), ('.', digit1).void())),
    )
        .take()
        .parse_next(input)
}

/// Parse `text` as a whole numeric literal.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let literal = number_literal.parse(text).ok()?;
    str::parse::<f64>(literal).ok()
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("100"), Some(100.0));
        assert_eq!(parse_number("33.33"), Some(33.33));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number("1e3"), None);
        assert_eq!(parse_number("1."), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_quoted_decodes_entities() {
        let mut input = r#""say #quot;hi#quot;" rest"#;
        assert_eq!(quoted(&mut input).unwrap(), r#"say "hi""#);
        assert_eq!(input, " rest");
    }

    #[test]
    fn test_keyword_requires_boundary() {
        assert!(keyword("end").parse("end").is_ok());
        assert!(keyword("end").parse("ending").is_err());
    }

    #[test]
    fn test_keyword_rest() {
        assert_eq!(keyword_rest("title").parse("title  My chart ").unwrap(), "My chart");
        assert!(keyword_rest("title").parse("title").is_err());
        assert!(keyword_rest("title").parse("titles x").is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, b ,,c"), vec!["a", "b", "c"]);
    }
}
