//! Frontmatter splitting: a `---` delimited metadata header followed by a
//! markdown body.
//!
//! # Grammar
//!
//! ```text
//! ---
//! title: Cloud Native Design
//! status: published
//! tags:
//!   - Architecture
//!   - DX Strategy
//! ---
//! # Body starts here
//! ```
//!
//! - `key: value` sets a scalar (trimmed, one pair of matching quotes removed)
//! - `key:` opens a list, filled by following `- item` lines
//! - anything else closes an open list and is otherwise ignored
//!
//! The grammar is lenient on purpose: unrecognized lines are skipped rather
//! than rejected, and unknown keys are kept. Required fields are enforced
//! later by the validator.

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// A metadata value: either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Scalar(String),
    List(Vec<String>),
}

/// Insertion-ordered metadata mapping.
///
/// A repeated key replaces the earlier value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Non-blank scalar value for `key`.
    ///
    /// Lists and blank strings read as absent.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            MetaValue::Scalar(value) if !value.trim().is_empty() => Some(value),
            _ => None,
        }
    }

    /// List value for `key`. Scalars read as absent.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            MetaValue::List(items) => Some(items),
            MetaValue::Scalar(_) => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn push_item(&mut self, key: &str, item: String) {
        if let Some((_, MetaValue::List(items))) = self.entries.iter_mut().find(|(k, _)| k == key)
        {
            items.push(item);
        }
    }
}

/// Serializes back to the frontmatter grammar (without delimiters).
impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match value {
                MetaValue::Scalar(value) => write!(f, "{key}: {value}")?,
                MetaValue::List(items) => {
                    write!(f, "{key}:")?;
                    for item in items {
                        write!(f, "\n  - {item}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Source text split into metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub metadata: Metadata,
    /// Markdown body, trimmed.
    pub body: String,
    /// 1-based line in the source file where `body` starts.
    pub body_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    #[error("metadata opened with `{DELIMITER}` on line 1 is never closed")]
    Unterminated,
}

/// Split raw file text into metadata and body.
///
/// Text that does not start with a `---` line is all body. An opening
/// delimiter without a closing one is an error.
pub fn parse(text: &str) -> Result<RawDocument, FrontmatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text: Cow<'_, str> = if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    };

    let lines: Vec<&str> = text.split('\n').collect();
    if !is_delimiter(lines[0]) {
        let (body, body_line) = trim_body(&text, 1);
        return Ok(RawDocument {
            metadata: Metadata::new(),
            body,
            body_line,
        });
    }

    let close = lines
        .iter()
        .skip(1)
        .position(|line| is_delimiter(line))
        .map(|i| i + 1)
        .ok_or(FrontmatterError::Unterminated)?;

    let metadata = parse_metadata(&lines[1..close]);
    let rest = lines[close + 1..].join("\n");
    // `close` is 0-based, so the line after it is `close + 2` in 1-based terms
    let (body, body_line) = trim_body(&rest, close + 2);

    Ok(RawDocument {
        metadata,
        body,
        body_line,
    })
}

#[inline]
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Trim the body and compute the file line its first character sits on.
fn trim_body(rest: &str, first_line: usize) -> (String, usize) {
    let trimmed_start = rest.trim_start();
    let skipped = &rest[..rest.len() - trimmed_start.len()];
    let body_line = first_line + skipped.matches('\n').count();
    (trimmed_start.trim_end().to_string(), body_line)
}

fn parse_metadata(lines: &[&str]) -> Metadata {
    let mut metadata = Metadata::new();
    let mut open_list: Option<String> = None;

    for line in lines {
        // blank lines never close an open list
        if line.trim().is_empty() {
            continue;
        }
        if let Some(key) = &open_list
            && let Some(item) = list_item(line)
        {
            metadata.push_item(key, item.to_string());
            continue;
        }

        match key_value(line) {
            Some((key, "")) => {
                metadata.insert(key, MetaValue::List(Vec::new()));
                open_list = Some(key.to_string());
            }
            Some((key, value)) => {
                metadata.insert(key, MetaValue::Scalar(unquote(value).to_string()));
                open_list = None;
            }
            None => open_list = None,
        }
    }

    metadata
}

/// `- item` (optionally indented) -> `item`
fn list_item(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some(rest.trim())
}

/// `key: value` -> (`key`, `value`), key restricted to `[A-Za-z0-9_]+`
fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let valid_key = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    valid_key.then(|| (key, value.trim()))
}

/// Remove one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return value[1..value.len() - 1].trim();
        }
    }
    value
}
