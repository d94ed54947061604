//! Text helpers shared by parsers and renderers.
//!
//! Quoted labels cannot contain a literal `"`, so it is written as the
//! `#quot;` entity. Both directions live here so that the parser and the
//! renderer can never disagree about the encoding.

/// Entity used for a literal double quote inside a quoted label.
pub const QUOTE_ENTITY: &str = "#quot;";

/// Replace `#quot;` entities with `"`.
pub fn decode_entities(text: &str) -> String {
    text.replace(QUOTE_ENTITY, "\"")
}

/// Replace `"` with the `#quot;` entity.
pub fn encode_entities(text: &str) -> String {
    text.replace('"', QUOTE_ENTITY)
}

/// Format a numeric field in its canonical form.
///
/// Integral values print without a fractional part (`100`), other values use
/// the shortest representation that parses back to the same `f64` (`33.33`).
///
/// ```
/// use diagrammar_core::text::format_number;
///
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(33.33), "33.33");
/// ```
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Returns `true` if `c` may appear in a bare identifier.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `text` is a non-empty run of identifier characters.
pub fn is_ident(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_ident_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_round_trip() {
        let label = r#"say "hi""#;
        let encoded = encode_entities(label);
        assert_eq!(encoded, "say #quot;hi#quot;");
        assert_eq!(decode_entities(&encoded), label);
    }

    #[test]
    fn test_format_number_integral_and_decimal() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(66.67), "66.67");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_is_ident() {
        assert!(is_ident("node_1"));
        assert!(!is_ident(""));
        assert!(!is_ident("a b"));
        assert!(!is_ident("a-b"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn formatted_numbers_parse_back(value in -1.0e12f64..1.0e12f64) {
            let text = format_number(value);
            prop_assert_eq!(text.parse::<f64>().ok(), Some(value));
            prop_assert!(!text.contains('e'));
        }

        #[test]
        fn entities_round_trip(label in "[a-z \"#;]{0,24}") {
            prop_assume!(!label.contains(QUOTE_ENTITY));
            prop_assert_eq!(decode_entities(&encode_entities(&label)), label);
        }
    }
}
