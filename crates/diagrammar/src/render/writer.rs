//! Line-oriented output buffer shared by the renderers.

use diagrammar_core::Metadata;

use crate::config::RenderOptions;

/// Accumulates canonical text one statement per line.
///
/// The header sits at column 0; every other line is indented by the current
/// depth, which starts at one unit and grows inside [`Writer::nested`].
pub(super) struct Writer<'o> {
    options: &'o RenderOptions,
    out: String,
    depth: usize,
}

impl<'o> Writer<'o> {
    pub(super) fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            out: String::new(),
            depth: 1,
        }
    }

    pub(super) fn options(&self) -> &'o RenderOptions {
        self.options
    }

    /// Write `title` as a front-matter block, for dialects without a title statement.
    pub(super) fn front_matter(&mut self, meta: &Metadata) {
        let Some(title) = &meta.title else {
            return;
        };
        self.out.push_str("---\ntitle: ");
        if needs_front_matter_quotes(title) {
            self.out.push('"');
            self.out.push_str(title);
            self.out.push('"');
        } else {
            self.out.push_str(title);
        }
        self.out.push_str("\n---\n");
    }

    pub(super) fn header(&mut self, header: &str) {
        self.out.push_str(header.trim_end());
        self.out.push('\n');
    }

    pub(super) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref().trim_end();
        for _ in 0..self.depth {
            self.out.push_str(self.options.indent().as_str());
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Run `body` one indentation level deeper.
    pub(super) fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    /// `accTitle:` and `accDescr:` lines for the fields that are set.
    pub(super) fn accessibility(&mut self, meta: &Metadata) {
        if let Some(title) = non_empty(&meta.acc_title) {
            self.line(format!("accTitle: {title}"));
        }
        if let Some(descr) = non_empty(&meta.acc_descr) {
            self.line(format!("accDescr: {descr}"));
        }
    }

    /// A `title text` statement for dialects that have one.
    pub(super) fn title(&mut self, meta: &Metadata) {
        if let Some(title) = non_empty(&meta.title) {
            self.line(format!("title {title}"));
        }
    }

    pub(super) fn finish(self) -> String {
        self.out
    }
}

/// A field value that is set and not blank.
pub(super) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A front-matter value is trimmed and loses one pair of surrounding quotes
/// when read back.
fn needs_front_matter_quotes(title: &str) -> bool {
    title.is_empty()
        || title.trim() != title
        || title.starts_with(['"', '\''])
        || title.ends_with(['"', '\''])
}
