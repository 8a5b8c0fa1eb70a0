//! Minimal markdown: a line-oriented block converter plus an inline
//! formatter, shared by the web and print paths.
//!
//! Supported blocks: ATX headings (`#`..`######`), paragraphs, `-` and `1.`
//! lists, fenced code with an optional language tag, and `---` rules.
//! Inline: links, code spans, `**bold**`, `*italic*`. Nested emphasis is not
//! supported.

mod convert;
pub mod inline;
mod render;

pub use convert::convert;
pub use inline::format_inline;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// One block element. Text fields already hold escaped, inline-formatted HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, html: String },
    Paragraph(String),
    List { kind: ListKind, items: Vec<String> },
    /// `code` is HTML-escaped.
    Code { lang: Option<String>, code: String },
    Rule,
}

/// Ordered blocks of one document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedBody {
    blocks: Vec<Block>,
}

impl ConvertedBody {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render to HTML, one element per line.
    pub fn to_html(&self) -> String {
        render::to_html(self.blocks())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    /// `line` is the 1-based body line of the opening fence.
    #[error("unterminated code fence")]
    UnterminatedFence { line: usize },
}

impl MarkdownError {
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedFence { line } => *line,
        }
    }
}
