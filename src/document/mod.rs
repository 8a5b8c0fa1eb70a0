//! Source documents: parsing, defaulting and validation.
//!
//! # Flow
//!
//! ```text
//! file text ──► frontmatter::parse ──► RawDocument
//!                                          │
//!                          normalize (config defaults, today)
//!                                          ▼
//!                                      Normalized ──► validate ──► Document
//! ```
//!
//! A [`Document`] is only ever produced by [`validate`], so everything
//! downstream (rendering, sitemap, PDF) can rely on its invariants.

pub mod error;
pub mod frontmatter;
mod normalize;
mod validate;

pub use error::SourceError;
pub use frontmatter::{FrontmatterError, Metadata, RawDocument};
pub use normalize::normalize;
pub use validate::{ValidationError, validate};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Draft,
    Published,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record after defaults are applied, before validation.
///
/// Every field is a plain string so the validator can report exactly what
/// the author wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub source: PathBuf,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub published_date: String,
    pub status: String,
    pub tags: Vec<String>,
    pub seo_title: String,
    pub seo_description: String,
    pub canonical_url: String,
    pub social_image_url: String,
    pub body: String,
    /// 1-based source line of the first body line.
    pub body_line: usize,
}

/// A validated document, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: PathBuf,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// `YYYY-MM-DD`
    pub published_date: String,
    pub status: Status,
    /// Never empty.
    pub tags: Vec<String>,
    pub seo_title: String,
    pub seo_description: String,
    pub canonical_url: String,
    pub social_image_url: String,
    pub body: String,
    pub body_line: usize,
}

impl Document {
    #[inline]
    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }

    /// Map a 1-based body line to the 1-based source file line.
    pub fn source_line(&self, body_line: usize) -> usize {
        self.body_line + body_line.saturating_sub(1)
    }

    /// Output file name shared by the HTML page, print page and PDF.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.slug)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str_is_exact() {
        assert_eq!("draft".parse(), Ok(Status::Draft));
        assert_eq!("published".parse(), Ok(Status::Published));
        assert!("Published".parse::<Status>().is_err());
        assert!("archived".parse::<Status>().is_err());
    }

    #[test]
    fn test_file_name() {
        let doc = test_support::document("cloud-native", "2024-06-01");
        assert_eq!(doc.file_name("html"), "cloud-native.html");
        assert_eq!(doc.file_name("pdf"), "cloud-native.pdf");
    }
}
