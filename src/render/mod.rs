//! Page rendering.
//!
//! One [`Renderer`] serves all three targets. Web pages (listing and single
//! document) share [`SHELL_HTML`](crate::embed::web::SHELL_HTML); print pages
//! use the standalone [`PAGE_HTML`](crate::embed::print::PAGE_HTML).
//!
//! Rendering is pure: the same page and config always give the same markup.

mod print;
mod web;

use crate::config::SiteConfig;
use crate::document::Document;
use crate::markdown::ConvertedBody;

/// What a page is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Listing,
    Single,
    Print,
}

/// A page to render, carrying exactly the data its target needs.
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    /// Summary of published documents, in any order.
    Listing { documents: &'a [&'a Document] },
    Single {
        document: &'a Document,
        body: &'a ConvertedBody,
    },
    Print {
        document: &'a Document,
        body: &'a ConvertedBody,
    },
}

impl Page<'_> {
    pub const fn target(&self) -> RenderTarget {
        match self {
            Self::Listing { .. } => RenderTarget::Listing,
            Self::Single { .. } => RenderTarget::Single,
            Self::Print { .. } => RenderTarget::Print,
        }
    }
}

pub struct Renderer<'c> {
    config: &'c SiteConfig,
}

impl<'c> Renderer<'c> {
    pub const fn new(config: &'c SiteConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, page: &Page<'_>) -> String {
        match *page {
            Page::Listing { documents } => web::listing(self.config, documents),
            Page::Single { document, body } => web::single(self.config, document, body),
            Page::Print { document, body } => print::page(self.config, document, body),
        }
    }
}

/// Prefix every non-empty line with `indent` spaces.
///
/// Lines continuing a `<pre>` element are left untouched so code blocks
/// keep their whitespace. Code text is escaped, so a literal `<pre` can
/// only come from markup.
fn indent(html: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut in_pre = false;
    html.lines()
        .map(|line| {
            let out = if in_pre || line.is_empty() {
                line.to_owned()
            } else {
                format!("{pad}{line}")
            };
            if let Some(open) = line.rfind("<pre") {
                in_pre = !line[open..].contains("</pre>");
            } else if line.contains("</pre>") {
                in_pre = false;
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}
