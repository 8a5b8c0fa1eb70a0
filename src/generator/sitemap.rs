//! Sitemap generation.
//!
//! Static routes from `[build.sitemap]` come first, in config order, then
//! one entry per published document.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/cloud-native-design.html</loc>
//!     <lastmod>2024-06-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{config::SiteConfig, document::Document, generator::minify_xml, log};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write the sitemap if enabled. Returns the written path.
pub fn build_sitemap(config: &SiteConfig, documents: &[&Document]) -> Result<Option<PathBuf>> {
    if !config.build.sitemap.enable {
        return Ok(None);
    }
    let sitemap = Sitemap::build(&config.build.sitemap.routes, documents, config);
    sitemap.write(config).map(Some)
}

#[derive(Debug)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

#[derive(Debug, PartialEq, Eq)]
struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    pub fn build(routes: &[String], documents: &[&Document], config: &SiteConfig) -> Self {
        let statics = routes.iter().map(|route| UrlEntry {
            loc: config.route_url(route),
            lastmod: None,
        });

        let pages = documents
            .iter()
            .filter(|doc| doc.is_published())
            .map(|doc| UrlEntry {
                loc: config.document_url(&doc.slug),
                lastmod: Some(doc.published_date.clone()),
            });

        Self {
            urls: statics.chain(pages).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 96);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&escape_xml(&lastmod));
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<PathBuf> {
        let sitemap_path = config.sitemap_path();
        let count = self.len();
        let xml = self.into_xml();
        let xml = minify_xml(xml.as_bytes(), config.build.minify);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!(
            "sitemap";
            "{} ({})",
            config.root_relative(&sitemap_path).display(),
            crate::utils::plural_count(count, "url")
        );
        Ok(sitemap_path)
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
