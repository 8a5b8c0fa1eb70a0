//! Per-document errors.
//!
//! Every variant here stops the whole run: a broken source file means the
//! published site would silently lose a page.

use super::{FrontmatterError, ValidationError};
use crate::markdown::MarkdownError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read source")]
    Io(#[from] std::io::Error),

    #[error("malformed frontmatter: {0}")]
    MalformedFrontmatter(#[from] FrontmatterError),

    #[error("malformed markdown: {0}")]
    MalformedMarkdown(#[from] MarkdownError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// A [`DocumentError`] located in a source file.
#[derive(Debug)]
pub struct SourceError {
    pub path: PathBuf,
    /// 1-based line, when the error points at one.
    pub line: Option<usize>,
    pub error: DocumentError,
}

impl SourceError {
    pub fn new(path: &Path, error: impl Into<DocumentError>) -> Self {
        Self {
            path: path.to_path_buf(),
            line: None,
            error: error.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}: {}", self.path.display(), self.error),
            None => write!(f, "{}: {}", self.path.display(), self.error),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.error {
            DocumentError::Io(err) => Some(err),
            _ => None,
        }
    }
}
