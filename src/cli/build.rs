//! Web build orchestration.
//!
//! Build pipeline phases:
//! - **Load** - Parse, normalize, validate and convert every source
//! - **Check** - Slug collisions among published documents, and the
//!   listing's reserved `index` name
//! - **Render** - One page per published document, then the listing
//! - **Sitemap** - Static routes plus published documents
//!
//! Nothing is written until every document has loaded and every slug is
//! unique.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::common::{
    LoadedDocument, ensure_listing_slug_free, ensure_unique_slugs, load_all, log_drafts,
};
use crate::config::SiteConfig;
use crate::document::Document;
use crate::generator::sitemap::build_sitemap;
use crate::render::{Page, Renderer};
use crate::utils::plural_count;
use crate::{debug, log};

/// What a web build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub listing: PathBuf,
    pub sitemap: Option<PathBuf>,
}

pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let loaded = load_all(config)?;
    let (published, drafts): (Vec<&LoadedDocument>, Vec<&LoadedDocument>) =
        loaded.iter().partition(|l| l.document.is_published());

    ensure_unique_slugs(published.iter().map(|l| &l.document), config)?;
    ensure_listing_slug_free(published.iter().map(|l| &l.document), config)?;

    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let renderer = Renderer::new(config);
    let pages = published
        .par_iter()
        .map(|l| write_single(&renderer, l, output))
        .collect::<Result<Vec<_>>>()?;

    let documents: Vec<&Document> = published.iter().map(|l| &l.document).collect();
    let listing = write_listing(&renderer, &documents, output)?;
    let sitemap = build_sitemap(config, &documents)?;

    let report = BuildReport {
        pages,
        listing,
        sitemap,
    };

    log!("build"; "{} in {}", plural_count(report.pages.len(), "page"), config.root_relative(output).display());
    debug!("build"; "listing {}", config.root_relative(&report.listing).display());
    if report.sitemap.is_none() {
        debug!("sitemap"; "disabled");
    }
    log_drafts(drafts.iter().map(|l| &l.document));

    Ok(report)
}

fn write_single(renderer: &Renderer<'_>, loaded: &LoadedDocument, output: &Path) -> Result<PathBuf> {
    let page = Page::Single {
        document: &loaded.document,
        body: &loaded.body,
    };
    let path = output.join(loaded.document.file_name("html"));
    fs::write(&path, renderer.render(&page))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("page"; "{:?} {}", page.target(), loaded.document.slug);
    Ok(path)
}

fn write_listing(renderer: &Renderer<'_>, documents: &[&Document], output: &Path) -> Result<PathBuf> {
    let html = renderer.render(&Page::Listing { documents });
    let path = output.join("index.html");
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
