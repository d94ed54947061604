//! Grammar engines that need a one-time asynchronous setup.
//!
//! The pie grammar is a set of compiled regular expressions. They are built
//! once, behind a [`tokio::sync::OnceCell`], and never change afterwards, so
//! any number of parses may share the engine concurrently. Per-parse state
//! lives in an accumulator owned by each call, never in the engine.

use log::debug;
use regex::Regex;
use tokio::sync::OnceCell;

use diagrammar_core::contract_violation;

static PIE: OnceCell<PieGrammar> = OnceCell::const_new();

/// Compiled recognizers for the pie dialect.
#[derive(Debug)]
pub(crate) struct PieGrammar {
    /// `[showData] [title text]` after the `pie` keyword.
    pub header: Regex,
    /// `title text`
    pub title: Regex,
    /// `"label" : value`
    pub section: Regex,
    /// `showData` on a line of its own.
    pub show_data: Regex,
}

impl PieGrammar {
    fn compile() -> Self {
        Self {
            header: compile(r"^(?:(showData)\b\s*)?(?:title(?:\s+(.*))?)?$"),
            title: compile(r"^title(?:\s+(.*))?$"),
            section: compile(r#"^"([^"]*)"\s*:\s*(.*)$"#),
            show_data: compile(r"^showData$"),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => contract_violation!("invalid built-in pattern `{pattern}`: {err}"),
    }
}

/// Initialise the pie grammar, or return it if it is already initialised.
pub(crate) async fn pie() -> &'static PieGrammar {
    PIE.get_or_init(|| async {
        debug!("Compiling pie grammar");
        PieGrammar::compile()
    })
    .await
}

/// The pie grammar, if [`pie`] has completed.
pub(crate) fn pie_ready() -> Option<&'static PieGrammar> {
    PIE.get()
}

/// Complete the one-time setup of every asynchronous grammar engine.
///
/// After this resolves, the synchronous entry points of every dialect work.
pub async fn init_engines() {
    pie().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let first = pie().await as *const PieGrammar;
        init_engines().await;
        let second = pie().await as *const PieGrammar;
        assert_eq!(first, second);
        assert!(pie_ready().is_some());
    }

    #[tokio::test]
    async fn test_header_pattern() {
        let grammar = pie().await;
        let caps = grammar.header.captures("showData title Pets").unwrap();
        assert!(caps.get(1).is_some());
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("Pets"));
        assert!(grammar.header.is_match(""));
        assert!(!grammar.header.is_match("bogus"));
    }
}
