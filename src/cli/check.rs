//! `folio check`: run the whole load chain and the slug check, write nothing.

use anyhow::Result;

use super::common::{ensure_listing_slug_free, ensure_unique_slugs, load_all, log_drafts};
use crate::config::SiteConfig;
use crate::utils::plural_count;
use crate::{debug, log};

/// Counts from a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    pub published: usize,
    pub drafts: usize,
}

/// Print outputs are named by slug for every document, so the slug check
/// covers drafts too.
pub fn check_documents(config: &SiteConfig) -> Result<CheckReport> {
    let loaded = load_all(config)?;
    ensure_unique_slugs(loaded.iter().map(|l| &l.document), config)?;
    ensure_listing_slug_free(
        loaded.iter().map(|l| &l.document).filter(|d| d.is_published()),
        config,
    )?;

    for l in &loaded {
        let doc = &l.document;
        debug!("check"; "{} [{}] {} ({})", doc.published_date, doc.status, doc.slug,
            config.root_relative(&doc.source).display());
    }

    let published = loaded.iter().filter(|l| l.document.is_published()).count();
    let report = CheckReport {
        published,
        drafts: loaded.len() - published,
    };

    log!("check"; "{} ok: {} published, {}",
        plural_count(loaded.len(), "document"), report.published,
        plural_count(report.drafts, "draft"));
    log_drafts(loaded.iter().map(|l| &l.document).filter(|d| !d.is_published()));
    Ok(report)
}
