//! Inline formatting within a single block of text.
//!
//! The input is HTML-escaped first, then each rule runs in a fixed order
//! over the text that earlier rules have not already turned into markup.

use crate::utils::html::escape;
use regex::{Captures, Regex};
use std::sync::LazyLock;

enum Segment {
    Text(String),
    Markup(String),
}

impl Segment {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) | Self::Markup(s) => s,
        }
    }
}

struct InlineRule {
    pattern: Regex,
    render: fn(&Captures<'_>) -> String,
}

impl InlineRule {
    fn new(pattern: &str, render: fn(&Captures<'_>) -> String) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            render,
        }
    }

    /// Split `text` into untouched text and rendered markup.
    fn apply(&self, text: String, out: &mut Vec<Segment>) {
        let mut last = 0;
        for caps in self.pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                out.push(Segment::Text(text[last..whole.start()].to_string()));
            }
            out.push(Segment::Markup((self.render)(&caps)));
            last = whole.end();
        }
        if last == 0 {
            out.push(Segment::Text(text));
        } else if last < text.len() {
            out.push(Segment::Text(text[last..].to_string()));
        }
    }
}

/// Links, code spans, bold, italic; in that order.
static RULES: LazyLock<[InlineRule; 4]> = LazyLock::new(|| {
    [
        InlineRule::new(r"\[([^\]]+)\]\((https?://[^ \t)]+)\)", |c| {
            format!(r#"<a href="{}">{}</a>"#, &c[2], &c[1])
        }),
        InlineRule::new(r"`([^`]+)`", |c| format!("<code>{}</code>", &c[1])),
        InlineRule::new(r"\*\*([^*]+)\*\*", |c| format!("<strong>{}</strong>", &c[1])),
        InlineRule::new(r"\*([^*]+)\*", |c| format!("<em>{}</em>", &c[1])),
    ]
});

/// Escape `text` and apply inline markup.
pub fn format_inline(text: &str) -> String {
    let mut segments = vec![Segment::Text(escape(text).into_owned())];

    for rule in RULES.iter() {
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => rule.apply(text, &mut next),
                markup @ Segment::Markup(_) => next.push(markup),
            }
        }
        segments = next;
    }

    segments.into_iter().map(Segment::into_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(
            format_inline(r#"a < b & "c" 'd'"#),
            "a &lt; b &amp; &quot;c&quot; &#39;d&#39;"
        );
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            format_inline("Some **bold** and *italic* text."),
            "Some <strong>bold</strong> and <em>italic</em> text."
        );
    }

    #[test]
    fn test_code_span_content_is_not_reformatted() {
        assert_eq!(
            format_inline("use `a*b*c` here"),
            "use <code>a*b*c</code> here"
        );
        assert_eq!(
            format_inline("`**not bold**`"),
            "<code>**not bold**</code>"
        );
    }

    #[test]
    fn test_code_span_is_escaped() {
        assert_eq!(
            format_inline("`<div>`"),
            "<code>&lt;div&gt;</code>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            format_inline("see [the docs](https://example.com/a?b=1&c=2) now"),
            r#"see <a href="https://example.com/a?b=1&amp;c=2">the docs</a> now"#
        );
    }

    #[test]
    fn test_link_label_keeps_emphasis_literal() {
        // a label is substituted as a whole; later rules never reach inside it
        assert_eq!(
            format_inline("[*x*](http://a.b)"),
            r#"<a href="http://a.b">*x*</a>"#
        );
    }

    #[test]
    fn test_non_http_link_is_plain_text() {
        assert_eq!(
            format_inline("[x](javascript:alert)"),
            "[x](javascript:alert)"
        );
    }

    #[test]
    fn test_unbalanced_markers_stay_literal() {
        assert_eq!(format_inline("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(format_inline("**open"), "**open");
    }

    #[test]
    fn test_escaped_html_cannot_form_markup() {
        assert_eq!(
            format_inline("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }
}
