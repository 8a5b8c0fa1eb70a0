//! Source loading shared by every command.
//!
//! ```text
//! content/*.md ──► read ──► parse ──► normalize ──► validate ──► convert
//! ```
//!
//! Each file runs the whole chain on the rayon pool. Results come back in
//! sorted file order and the first failure in that order stops the run, so
//! the reported error does not depend on thread timing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::address::conflict::{collect_slug_sources, detect_conflicts, print_conflicts};
use crate::config::SiteConfig;
use crate::document::{self, Document, SourceError, frontmatter};
use crate::markdown::{self, ConvertedBody};
use crate::utils::{date, plural_count};
use crate::{debug, log};

/// A validated document together with its converted body.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub body: ConvertedBody,
}

/// `*.md` files directly inside `dir`, sorted by file name.
pub fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("content directory `{}` not found", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}

/// Run one file through the whole chain.
pub fn load_document(path: &Path, config: &SiteConfig, today: &str) -> Result<LoadedDocument, SourceError> {
    let text = fs::read_to_string(path).map_err(|err| SourceError::new(path, err))?;
    let raw = frontmatter::parse(&text).map_err(|err| SourceError::new(path, err).at_line(1))?;

    let normalized = document::normalize(raw, path, config, today);
    let document = document::validate(normalized).map_err(|err| SourceError::new(path, err))?;

    let body = markdown::convert(&document.body).map_err(|err| {
        let line = document.source_line(err.line());
        SourceError::new(path, err).at_line(line)
    })?;

    Ok(LoadedDocument { document, body })
}

/// Load every source in the content directory.
pub fn load_all(config: &SiteConfig) -> Result<Vec<LoadedDocument>> {
    let files = collect_sources(&config.build.content)?;
    let today = date::today();
    debug!("load"; "{} in {}", plural_count(files.len(), "source"),
        config.root_relative(&config.build.content).display());

    let results: Vec<_> = files
        .par_iter()
        .map(|path| load_document(path, config, &today))
        .collect();

    results
        .into_iter()
        .map(|result| result.map_err(|err| relativize(err, config)))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to load documents")
}

/// Fail when two of `documents` share a slug. Conflicts are listed first.
pub fn ensure_unique_slugs<'a, I>(documents: I, config: &SiteConfig) -> Result<()>
where
    I: IntoIterator<Item = &'a Document>,
{
    let sources = collect_slug_sources(documents);
    let conflicts = detect_conflicts(&sources, config.get_root());
    if conflicts.is_empty() {
        return Ok(());
    }
    print_conflicts(&conflicts);
    bail!("{} shared by more than one document", plural_count(conflicts.len(), "slug"))
}

/// Output stem of the web listing page.
pub const LISTING_SLUG: &str = "index";

/// Fail when a published document would overwrite the listing page.
pub fn ensure_listing_slug_free<'a, I>(published: I, config: &SiteConfig) -> Result<()>
where
    I: IntoIterator<Item = &'a Document>,
{
    match published.into_iter().find(|d| d.slug == LISTING_SLUG) {
        Some(doc) => bail!(
            "{}: slug `{LISTING_SLUG}` is reserved for the listing page",
            config.root_relative(&doc.source).display()
        ),
        None => Ok(()),
    }
}

/// Log drafts left out of the web section, by slug.
pub fn log_drafts<'a, I>(drafts: I)
where
    I: IntoIterator<Item = &'a Document>,
{
    let slugs: Vec<&str> = drafts.into_iter().map(|d| d.slug.as_str()).collect();
    if !slugs.is_empty() {
        log!("draft"; "{} skipped: {}", plural_count(slugs.len(), "draft"), slugs.join(", "));
    }
}

fn relativize(mut err: SourceError, config: &SiteConfig) -> SourceError {
    err.path = config.root_relative(&err.path);
    err
}
