//! Slug conflict detection.
//!
//! Output files are named by slug, so two documents sharing a slug would
//! silently overwrite each other. Conflicts are collected over the whole
//! document set and reported together before anything is written.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::document::Document;
use crate::log;
use crate::utils::plural_s;

/// Slug sources map: slug -> list of source files claiming that slug.
pub type SlugSourceMap<'a> = FxHashMap<&'a str, Vec<&'a Path>>;

/// Multiple documents claim the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugConflict {
    pub slug: String,
    /// Source paths claiming this slug (relative to root), in input order
    pub sources: Vec<PathBuf>,
}

/// Map every slug to the documents that produce it.
pub fn collect_slug_sources<'a, I>(documents: I) -> SlugSourceMap<'a>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut slug_sources = SlugSourceMap::default();
    for doc in documents {
        slug_sources
            .entry(doc.slug.as_str())
            .or_default()
            .push(doc.source.as_path());
    }
    slug_sources
}

/// Slugs with more than one source, sorted by slug.
pub fn detect_conflicts(slug_sources: &SlugSourceMap<'_>, root: &Path) -> Vec<SlugConflict> {
    let mut conflicts: Vec<_> = slug_sources
        .iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(slug, sources)| SlugConflict {
            slug: (*slug).to_owned(),
            sources: sources
                .iter()
                .map(|p| p.strip_prefix(root).unwrap_or(p).to_path_buf())
                .collect(),
        })
        .collect();
    conflicts.sort_by(|a, b| a.slug.cmp(&b.slug));
    conflicts
}

/// Print conflicts using the standard log format.
///
/// ```text
/// [error] slug conflicts (1 slug, 2 sources)
/// [slug] cloud-native-design (2 sources)
///   - content/cloud-native-design.md
///   - content/Cloud Native Design.md
/// ```
pub fn print_conflicts(conflicts: &[SlugConflict]) {
    if conflicts.is_empty() {
        return;
    }

    let total_sources: usize = conflicts.iter().map(|c| c.sources.len()).sum();
    log!("error"; "slug conflicts ({} slug{}, {} source{})",
        conflicts.len(), plural_s(conflicts.len()),
        total_sources, plural_s(total_sources));

    for conflict in conflicts {
        eprintln!();
        log!("slug"; "{} ({} source{})", conflict.slug, conflict.sources.len(), plural_s(conflict.sources.len()));
        for source in &conflict.sources {
            eprintln!("  - {}", source.display());
        }
    }
}
