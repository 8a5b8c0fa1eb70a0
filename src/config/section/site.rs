//! `[site]` section configuration.
//!
//! Brand, canonical URL, document defaults and the page chrome shared by
//! every web page.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "PegaGuru"
//! url = "https://pegaguru.com"
//! default_tag = "Architecture"
//! social_image = "https://pegaguru.com/assets/og-blog-default.png"
//! footer = "Architecture-first LSA readiness."
//!
//! [site.listing]
//! title = "PegaGuru Blog | Advanced Pega Architecture"
//! eyebrow = "PegaGuru Blog"
//! heading = "Architecture decisions, not platform trivia."
//!
//! [[site.listing.topics]]
//! label = "Constellation"
//! key = "constellation"
//!
//! [[site.nav]]
//! label = "Blog"
//! href = "blog/index.html"
//! key = "blog"
//!
//! [[site.cta]]
//! label = "Enterprise Path: Architecture Advisory"
//! href = "https://calendar.example.com/book"
//! kind = "enterprise"
//! show_on = "listing"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Brand name, also the SEO title suffix.
    pub name: String,
    /// Absolute site URL (e.g., "https://example.com").
    pub url: String,
    pub language: String,
    pub description: String,
    /// Tag applied to documents that declare none.
    pub default_tag: String,
    /// Excerpt used when a document has no prose line.
    pub default_excerpt: String,
    /// Default Open Graph image.
    pub social_image: String,
    /// Footer line after the copyright notice.
    pub footer: String,
    pub listing: ListingConfig,
    pub nav: Vec<NavLink>,
    pub cta: Vec<CtaLink>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            language: "en".into(),
            description: String::new(),
            default_tag: "Architecture".into(),
            default_excerpt: String::new(),
            social_image: String::new(),
            footer: String::new(),
            listing: ListingConfig::default(),
            nav: Vec::new(),
            cta: Vec::new(),
        }
    }
}

impl SiteSection {
    pub const NAME: FieldPath = FieldPath::new("site.name");
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const DEFAULT_TAG: FieldPath = FieldPath::new("site.default_tag");
    pub const NAV: FieldPath = FieldPath::new("site.nav");

    /// Site URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// CTA links shown on the given page kind, in config order.
    pub fn cta_for(&self, placement: CtaPlacement) -> impl Iterator<Item = &CtaLink> {
        self.cta.iter().filter(move |cta| cta.show_on.includes(placement))
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `name` is not blank
    /// - `url` is an http(s) URL with a host
    /// - `default_tag` is not blank (documents without tags fall back to it)
    /// - nav keys are unique
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error_with_hint(
                Self::NAME,
                "site name is required",
                format!("set {}, e.g.: \"PegaGuru\"", Self::NAME),
            );
        }

        if self.default_tag.trim().is_empty() {
            diag.error(Self::DEFAULT_TAG, "default tag must not be blank");
        }

        self.validate_url(diag);

        let mut keys: Vec<&str> = self.nav.iter().map(|n| n.key.as_str()).collect();
        keys.sort_unstable();
        if let Some(dup) = keys.windows(2).find(|w| w[0] == w[1]) {
            diag.error(Self::NAV, format!("nav key `{}` is used more than once", dup[0]));
        }
    }

    fn validate_url(&self, diag: &mut ConfigDiagnostics) {
        if self.url.trim().is_empty() {
            diag.error_with_hint(
                Self::URL,
                "site URL is required for canonical links and the sitemap",
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            );
            return;
        }

        match url::Url::parse(&self.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}

/// `[site.listing]`: listing page head and hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// `<title>` and `og:title` of the listing page.
    pub title: String,
    pub description: String,
    pub eyebrow: String,
    pub heading: String,
    pub lead: String,
    /// Label of the link from a document page back to the listing.
    pub back_label: String,
    /// Topic chips under the hero.
    pub topics: Vec<Topic>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            title: "Blog".into(),
            description: String::new(),
            eyebrow: String::new(),
            heading: "Blog".into(),
            lead: String::new(),
            back_label: "Back to Blog".into(),
            topics: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub label: String,
    /// Analytics key, emitted as `blog_filter_{key}`.
    pub key: String,
}

/// `[[site.nav]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Relative to the site root; prefixed with `build.nav_prefix`.
    pub href: String,
    /// Marked `aria-current="page"` when equal to `build.section`.
    pub key: String,
}

/// Where a call-to-action is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaPlacement {
    Listing,
    Article,
    #[default]
    Both,
}

impl CtaPlacement {
    pub fn includes(self, page: Self) -> bool {
        self == Self::Both || self == page
    }
}

/// `[[site.cta]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtaLink {
    pub label: String,
    pub href: String,
    /// Booking widget type (`data-booking-type`).
    #[serde(default)]
    pub kind: Option<String>,
    /// Analytics event name (`data-analytics-event`).
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub show_on: CtaPlacement,
}
