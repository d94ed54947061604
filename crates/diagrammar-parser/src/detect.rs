//! Dialect detection from the header line.
//!
//! The detector never parses a body. It looks at the first significant line
//! (after front matter and `%%` comments) and matches a dialect keyword at its
//! start, case-insensitively, followed by a word boundary.

use diagrammar_core::DialectTag;

use crate::source;

/// Identify the dialect of `text`, or `None` if no header keyword matches.
///
/// ```
/// use diagrammar_core::DialectTag;
/// use diagrammar_parser::detect;
///
/// assert_eq!(detect("pie showData"), Some(DialectTag::Pie));
/// assert_eq!(detect("piexyz"), None);
/// ```
pub fn detect(text: &str) -> Option<DialectTag> {
    let line = source::first_significant_line(text)?;
    DialectTag::ALL
        .into_iter()
        .find(|&tag| keyword_len(line, tag).is_some())
}

/// Byte length of the `tag` keyword at the start of `line`, if one matches.
pub(crate) fn keyword_len(line: &str, tag: DialectTag) -> Option<usize> {
    tag.keywords()
        .iter()
        .find(|keyword| {
            line.get(..keyword.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
                && is_boundary(&line[keyword.len()..])
        })
        .map(|keyword| keyword.len())
}

fn is_boundary(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'))
}

macro_rules! predicates {
    ($($(#[$doc:meta])* $name:ident => $tag:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(text: &str) -> bool {
                detect(text) == Some(DialectTag::$tag)
            }
        )*
    };
}

predicates! {
    /// Returns `true` if `text` starts with a `flowchart` or `graph` header.
    is_flowchart => Flowchart,
    /// Returns `true` if `text` starts with a `classDiagram` header.
    is_class => Class,
    /// Returns `true` if `text` starts with a `sequenceDiagram` header.
    is_sequence => Sequence,
    /// Returns `true` if `text` starts with a `stateDiagram` header.
    is_state => State,
    /// Returns `true` if `text` starts with a `pie` header.
    is_pie => Pie,
    /// Returns `true` if `text` starts with an `erDiagram` header.
    is_er => Er,
    /// Returns `true` if `text` starts with a `mindmap` header.
    is_mindmap => Mindmap,
    /// Returns `true` if `text` starts with a `quadrantChart` header.
    is_quadrant => Quadrant,
    /// Returns `true` if `text` starts with a `sankey` header.
    is_sankey => Sankey,
    /// Returns `true` if `text` starts with a `timeline` header.
    is_timeline => Timeline,
    /// Returns `true` if `text` starts with a `journey` header.
    is_journey => Journey,
    /// Returns `true` if `text` starts with an `xychart` header.
    is_xychart => XyChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_boundary_cases() {
        assert!(is_pie("pie"));
        assert!(is_pie("  pie"));
        assert!(is_pie("\npie"));
        assert!(is_pie("pie showData"));
        assert!(is_pie("PIE"));
        assert!(!is_pie("piexyz"));
        assert!(!is_pie("pie_chart"));
    }

    #[test]
    fn test_versioned_keywords() {
        assert_eq!(detect("stateDiagram-v2\n"), Some(DialectTag::State));
        assert_eq!(detect("stateDiagram\n"), Some(DialectTag::State));
        assert_eq!(detect("stateDiagram-v3"), None);
        assert_eq!(detect("sankey-beta"), Some(DialectTag::Sankey));
        assert_eq!(detect("xychart-beta horizontal"), Some(DialectTag::XyChart));
    }

    #[test]
    fn test_skips_front_matter_and_comments() {
        let text = "---\ntitle: Pets\n---\n%% a comment\n\ngraph LR\n";
        assert!(is_flowchart(text));
    }

    #[test]
    fn test_unknown_dialect() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("gantt\n"), None);
        assert_eq!(detect("A --> B"), None);
    }

    #[test]
    fn test_every_canonical_keyword_detects_its_tag() {
        for tag in DialectTag::ALL {
            assert_eq!(detect(tag.canonical_keyword()), Some(tag), "{tag}");
        }
    }
}
