//! Block to HTML rendering.

use super::Block;
use crate::utils::html::escape_attr;
use std::fmt::{self, Write};

/// Render blocks as HTML, one element per line.
pub fn to_html(blocks: &[Block]) -> String {
    let mut html = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            html.push('\n');
        }
        // writing to a String never fails
        let _ = write_block(&mut html, block);
    }
    html
}

fn write_block(out: &mut String, block: &Block) -> fmt::Result {
    match block {
        Block::Heading { level, html } => write!(out, "<h{level}>{html}</h{level}>"),
        Block::Paragraph(html) => write!(out, "<p>{html}</p>"),
        Block::List { kind, items } => {
            let tag = kind.tag();
            write!(out, "<{tag}>")?;
            for item in items {
                write!(out, "\n  <li>{item}</li>")?;
            }
            write!(out, "\n</{tag}>")
        }
        Block::Code {
            lang: Some(lang),
            code,
        } => write!(
            out,
            r#"<pre><code class="language-{}">{code}</code></pre>"#,
            escape_attr(lang)
        ),
        Block::Code { lang: None, code } => write!(out, "<pre><code>{code}</code></pre>"),
        Block::Rule => out.write_str("<hr />"),
    }
}
