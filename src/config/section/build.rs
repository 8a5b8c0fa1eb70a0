//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content/blog"             # Markdown sources (relative to site root)
//! output = "blog"                      # Generated HTML (relative to site root)
//! section = "blog"                     # URL segment and active nav key
//! nav_prefix = "../"                   # Prefix for nav links from generated pages
//! stylesheet = "../assets/css/styles.css"
//! script = "../assets/js/main.js"
//! minify = false
//!
//! [build.sitemap]
//! enable = true
//! path = "sitemap.xml"                 # Relative to site root
//! routes = ["/", "/lsa-readiness-roadmap.html", "/blog/"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::slug::is_valid_slug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Markdown source directory.
    pub content: PathBuf,
    /// Output directory for the listing and document pages.
    pub output: PathBuf,
    /// URL segment under `site.url` where pages are published.
    pub section: String,
    pub nav_prefix: String,
    pub stylesheet: String,
    pub script: String,
    /// Minify the sitemap.
    pub minify: bool,
    pub sitemap: SitemapConfig,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            section: "blog".into(),
            nav_prefix: "../".into(),
            stylesheet: "../assets/css/styles.css".into(),
            script: "../assets/js/main.js".into(),
            minify: false,
            sitemap: SitemapConfig::default(),
        }
    }
}

impl BuildSection {
    pub const SECTION: FieldPath = FieldPath::new("build.section");
    pub const CONTENT: FieldPath = FieldPath::new("build.content");

    /// Validate build configuration.
    ///
    /// `section` may be empty (pages at the site root); otherwise it must be
    /// a slug since it becomes a URL segment.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.section.is_empty() && !is_valid_slug(&self.section) {
            diag.error_with_hint(
                Self::SECTION,
                format!("`{}` is not a valid URL segment", self.section),
                "use lowercase letters, digits and single hyphens, e.g. \"blog\"",
            );
        }

        if self.content.as_os_str().is_empty() {
            diag.error(Self::CONTENT, "content directory must not be empty");
        }

        self.sitemap.validate(diag);
    }
}

/// `[build.sitemap]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    /// Output path, relative to the site root.
    pub path: PathBuf,
    /// Static locations listed before documents. Relative routes are
    /// joined to `site.url`.
    pub routes: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
            routes: vec!["/".into()],
        }
    }
}

impl SitemapConfig {
    pub const PATH: FieldPath = FieldPath::new("build.sitemap.path");
    pub const ROUTES: FieldPath = FieldPath::new("build.sitemap.routes");

    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if self.path.is_absolute() {
            diag.error_with_hint(
                Self::PATH,
                "sitemap path must be relative to the site root",
                "e.g. \"sitemap.xml\"",
            );
        }
        if let Some(route) = self.routes.iter().find(|r| r.trim().is_empty()) {
            diag.error(Self::ROUTES, format!("empty route `{route}`"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let build = BuildSection::default();
        assert_eq!(build.section, "blog");
        assert!(!build.minify);
        assert!(build.sitemap.enable);
        assert_eq!(build.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_parse_build_section() {
        let config = test_parse_config(
            "[build]\ncontent = \"posts\"\nsection = \"articles\"\n\
             [build.sitemap]\nenable = false\nroutes = [\"/\", \"/about.html\"]",
        );
        assert_eq!(config.build.content, PathBuf::from("posts"));
        assert_eq!(config.build.section, "articles");
        assert!(!config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.routes.len(), 2);
    }

    #[test]
    fn test_invalid_section() {
        let build = BuildSection {
            section: "My Blog".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, BuildSection::SECTION);
    }

    #[test]
    fn test_empty_section_is_allowed() {
        let build = BuildSection {
            section: String::new(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_absolute_sitemap_path() {
        let mut build = BuildSection::default();
        build.sitemap.path = PathBuf::from("/etc/sitemap.xml");
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, SitemapConfig::PATH);
    }
}
