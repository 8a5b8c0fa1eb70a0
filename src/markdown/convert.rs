//! Line-oriented block conversion.
//!
//! Each line is classified once into a [`LineKind`], then [`Converter::step`]
//! applies the transition for the current [`State`]. Blocks are only ever
//! appended, so output order follows source order.

use super::{Block, ConvertedBody, ListKind, MarkdownError, format_inline};
use crate::utils::html::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Fence { lang: &'a str },
    Blank,
    Rule,
    Heading { level: u8, text: &'a str },
    Item { kind: ListKind, text: &'a str },
    Text(&'a str),
}

/// Classify a trimmed line.
fn classify(line: &str) -> LineKind<'_> {
    if let Some(lang) = line.strip_prefix("```") {
        return LineKind::Fence { lang: lang.trim() };
    }
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.len() >= 3 && line.bytes().all(|b| b == b'-') {
        return LineKind::Rule;
    }
    if let Some((level, text)) = heading(line) {
        return LineKind::Heading { level, text };
    }
    if let Some(text) = after_marker(line.strip_prefix('-')) {
        return LineKind::Item {
            kind: ListKind::Unordered,
            text,
        };
    }
    if let Some(text) = ordered_item(line) {
        return LineKind::Item {
            kind: ListKind::Ordered,
            text,
        };
    }
    LineKind::Text(line)
}

/// `#{1,6}` followed by whitespace and text.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let text = after_marker(Some(&line[hashes..]))?;
    Some((u8::try_from(hashes).ok()?, text))
}

/// `1. item`, any number of digits.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    after_marker(line[digits..].strip_prefix('.'))
}

/// Text after a block marker, which must be followed by whitespace.
fn after_marker(rest: Option<&str>) -> Option<&str> {
    let rest = rest?;
    rest.starts_with([' ', '\t']).then(|| rest.trim_start())
}

#[derive(Debug)]
enum State {
    Normal {
        paragraph: Vec<String>,
    },
    InCodeBlock {
        lang: Option<String>,
        opened_at: usize,
        lines: Vec<String>,
    },
    InList {
        kind: ListKind,
        items: Vec<String>,
    },
}

impl State {
    const fn normal() -> Self {
        Self::Normal {
            paragraph: Vec::new(),
        }
    }
}

struct Converter {
    state: State,
    blocks: Vec<Block>,
}

impl Converter {
    const fn new() -> Self {
        Self {
            state: State::normal(),
            blocks: Vec::new(),
        }
    }

    fn step(&mut self, line_no: usize, raw: &str) {
        let kind = classify(raw.trim());
        let state = std::mem::replace(&mut self.state, State::normal());

        self.state = match (state, kind) {
            (State::InCodeBlock { lang, lines, .. }, LineKind::Fence { .. }) => {
                self.blocks.push(Block::Code {
                    lang,
                    code: escape(&lines.join("\n")).into_owned(),
                });
                State::normal()
            }
            (
                State::InCodeBlock {
                    lang,
                    opened_at,
                    mut lines,
                },
                _,
            ) => {
                lines.push(raw.to_string());
                State::InCodeBlock {
                    lang,
                    opened_at,
                    lines,
                }
            }
            (state, LineKind::Fence { lang }) => {
                self.close(state);
                State::InCodeBlock {
                    lang: (!lang.is_empty()).then(|| lang.to_string()),
                    opened_at: line_no,
                    lines: Vec::new(),
                }
            }
            (state, LineKind::Blank) => {
                self.close(state);
                State::normal()
            }
            (state, LineKind::Rule) => {
                self.close(state);
                self.blocks.push(Block::Rule);
                State::normal()
            }
            (state, LineKind::Heading { level, text }) => {
                self.close(state);
                self.blocks.push(Block::Heading {
                    level,
                    html: format_inline(text),
                });
                State::normal()
            }
            (State::InList { kind, mut items }, LineKind::Item { kind: item_kind, text })
                if kind == item_kind =>
            {
                items.push(format_inline(text));
                State::InList { kind, items }
            }
            (state, LineKind::Item { kind, text }) => {
                self.close(state);
                State::InList {
                    kind,
                    items: vec![format_inline(text)],
                }
            }
            (State::Normal { mut paragraph }, LineKind::Text(text)) => {
                paragraph.push(text.to_string());
                State::Normal { paragraph }
            }
            (state, LineKind::Text(text)) => {
                self.close(state);
                State::Normal {
                    paragraph: vec![text.to_string()],
                }
            }
        };
    }

    /// Flush a pending paragraph or open list.
    fn close(&mut self, state: State) {
        match state {
            State::Normal { paragraph } if !paragraph.is_empty() => {
                self.blocks
                    .push(Block::Paragraph(format_inline(&paragraph.join(" "))));
            }
            State::InList { kind, items } => self.blocks.push(Block::List { kind, items }),
            // code blocks are handled before `close` is reached
            State::Normal { .. } | State::InCodeBlock { .. } => {}
        }
    }

    fn finish(mut self) -> Result<ConvertedBody, MarkdownError> {
        let state = std::mem::replace(&mut self.state, State::normal());
        if let State::InCodeBlock { opened_at, .. } = state {
            return Err(MarkdownError::UnterminatedFence { line: opened_at });
        }
        self.close(state);
        Ok(ConvertedBody {
            blocks: self.blocks,
        })
    }
}

/// Convert a markdown body into blocks.
///
/// Fails only on a code fence that is never closed; the error carries the
/// 1-based body line of the opening fence.
pub fn convert(body: &str) -> Result<ConvertedBody, MarkdownError> {
    let mut converter = Converter::new();
    for (idx, line) in body.lines().enumerate() {
        converter.step(idx + 1, line);
    }
    converter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(body: &str) -> Vec<Block> {
        convert(body).unwrap().blocks().to_vec()
    }

    fn items(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_heading_paragraph_list() {
        let body = "# Title Line\n\nSome **bold** and *italic* text.\n\n- item one\n- item two";
        assert_eq!(
            blocks(body),
            vec![
                Block::Heading {
                    level: 1,
                    html: "Title Line".into()
                },
                Block::Paragraph("Some <strong>bold</strong> and <em>italic</em> text.".into()),
                Block::List {
                    kind: ListKind::Unordered,
                    items: items(&["item one", "item two"]),
                },
            ]
        );
    }

    #[test]
    fn test_paragraph_lines_join_with_space() {
        assert_eq!(
            blocks("first line\n  second line  \nthird"),
            vec![Block::Paragraph("first line second line third".into())]
        );
    }

    #[test]
    fn test_heading_levels() {
        let out = blocks("###### six\n####### seven\n#nospace");
        assert_eq!(
            out[0],
            Block::Heading {
                level: 6,
                html: "six".into()
            }
        );
        assert_eq!(
            out[1],
            Block::Paragraph("####### seven #nospace".into())
        );
    }

    #[test]
    fn test_heading_flushes_paragraph() {
        assert_eq!(
            blocks("para\n## Next"),
            vec![
                Block::Paragraph("para".into()),
                Block::Heading {
                    level: 2,
                    html: "Next".into()
                },
            ]
        );
    }

    #[test]
    fn test_fenced_code_is_escaped_and_verbatim() {
        let body = "```rust\nfn main() {\n    let a = 1 < 2;\n}\n```";
        assert_eq!(
            blocks(body),
            vec![Block::Code {
                lang: Some("rust".into()),
                code: "fn main() {\n    let a = 1 &lt; 2;\n}".into(),
            }]
        );
    }

    #[test]
    fn test_code_block_buffers_markdown_lines() {
        let body = "```\n# not a heading\n\n- not an item\n---\n```";
        assert_eq!(
            blocks(body),
            vec![Block::Code {
                lang: None,
                code: "# not a heading\n\n- not an item\n---".into(),
            }]
        );
    }

    #[test]
    fn test_fence_flushes_paragraph_and_list() {
        let out = blocks("para\n```\nx\n```\n- a\n```\ny\n```");
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], Block::Paragraph("para".into()));
        assert!(matches!(out[1], Block::Code { .. }));
        assert!(matches!(out[2], Block::List { .. }));
        assert!(matches!(out[3], Block::Code { .. }));
    }

    #[test]
    fn test_unterminated_fence() {
        let err = convert("intro\n\n```js\nconsole.log(1)").unwrap_err();
        assert_eq!(err, MarkdownError::UnterminatedFence { line: 3 });
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_rule() {
        assert_eq!(
            blocks("above\n---\nbelow"),
            vec![
                Block::Paragraph("above".into()),
                Block::Rule,
                Block::Paragraph("below".into()),
            ]
        );
        assert_eq!(blocks("-----"), vec![Block::Rule]);
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            blocks("1. one\n2. two\n10. ten"),
            vec![Block::List {
                kind: ListKind::Ordered,
                items: items(&["one", "two", "ten"]),
            }]
        );
    }

    #[test]
    fn test_list_kind_switch_closes_list() {
        assert_eq!(
            blocks("- a\n1. b"),
            vec![
                Block::List {
                    kind: ListKind::Unordered,
                    items: items(&["a"]),
                },
                Block::List {
                    kind: ListKind::Ordered,
                    items: items(&["b"]),
                },
            ]
        );
    }

    #[test]
    fn test_text_after_list_closes_it() {
        assert_eq!(
            blocks("- a\n- b\nafter"),
            vec![
                Block::List {
                    kind: ListKind::Unordered,
                    items: items(&["a", "b"]),
                },
                Block::Paragraph("after".into()),
            ]
        );
    }

    #[test]
    fn test_item_flushes_paragraph() {
        assert_eq!(
            blocks("intro\n- a"),
            vec![
                Block::Paragraph("intro".into()),
                Block::List {
                    kind: ListKind::Unordered,
                    items: items(&["a"]),
                },
            ]
        );
    }

    #[test]
    fn test_marker_without_space_is_text() {
        assert_eq!(
            blocks("-dash\n1.5 million"),
            vec![Block::Paragraph("-dash 1.5 million".into())]
        );
    }

    #[test]
    fn test_list_items_are_inline_formatted() {
        assert_eq!(
            blocks("- **a** `b`"),
            vec![Block::List {
                kind: ListKind::Unordered,
                items: items(&["<strong>a</strong> <code>b</code>"]),
            }]
        );
    }

    #[test]
    fn test_empty_body() {
        assert!(convert("").unwrap().is_empty());
        assert!(convert("\n\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let body = "# T\n\npara *x*\n\n- a\n- b\n\n```sh\nls\n```\n\n---\n1. z";
        assert_eq!(convert(body).unwrap(), convert(body).unwrap());
        assert_eq!(
            convert(body).unwrap().to_html(),
            convert(body).unwrap().to_html()
        );
    }
}
