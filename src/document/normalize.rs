//! Default application: turn loose author metadata into a complete record.

use super::validate::EXCERPT_LIMIT;
use super::{Normalized, RawDocument};
use crate::config::SiteConfig;
use crate::utils::slug::{slugify, titleize};
use std::path::Path;

const ELLIPSIS: &str = "...";

/// Metadata keys, with accepted aliases.
mod keys {
    pub const TITLE: &str = "title";
    pub const SLUG: &str = "slug";
    pub const EXCERPT: &str = "excerpt";
    pub const PUBLISHED: [&str; 2] = ["publishedAt", "publishedDate"];
    pub const STATUS: &str = "status";
    pub const TAGS: &str = "tags";
    pub const SEO_TITLE: &str = "seoTitle";
    pub const SEO_DESCRIPTION: &str = "seoDescription";
    pub const CANONICAL: &str = "canonicalUrl";
    pub const SOCIAL_IMAGE: [&str; 2] = ["ogImage", "socialImageUrl"];
}

/// Apply defaults to a parsed document.
///
/// Pure: everything the defaults depend on (site settings, today's date)
/// is passed in.
pub fn normalize(raw: RawDocument, source: &Path, config: &SiteConfig, today: &str) -> Normalized {
    let meta = &raw.metadata;
    let site = &config.site;
    let file_stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let title = meta
        .scalar(keys::TITLE)
        .map(str::to_string)
        .or_else(|| first_heading(&raw.body))
        .unwrap_or_else(|| titleize(&slugify(&file_stem)));

    let slug = meta
        .scalar(keys::SLUG)
        .map_or_else(|| slugify(&file_stem), str::to_string);

    let excerpt = meta
        .scalar(keys::EXCERPT)
        .map(str::to_string)
        .or_else(|| derive_excerpt(&raw.body))
        .unwrap_or_else(|| site.default_excerpt.clone());

    let published_date = first_scalar(meta, &keys::PUBLISHED).unwrap_or(today).to_string();

    let status = meta.scalar(keys::STATUS).unwrap_or("draft").to_string();

    let tags = match meta.list(keys::TAGS) {
        Some(tags) if !tags.is_empty() => tags.to_vec(),
        _ => vec![site.default_tag.clone()],
    };

    let seo_title = meta
        .scalar(keys::SEO_TITLE)
        .map_or_else(|| format!("{title} | {}", site.name), str::to_string);

    let seo_description = meta
        .scalar(keys::SEO_DESCRIPTION)
        .map_or_else(|| excerpt.clone(), str::to_string);

    let canonical_url = meta
        .scalar(keys::CANONICAL)
        .map_or_else(|| config.document_url(&slug), str::to_string);

    let social_image_url = first_scalar(meta, &keys::SOCIAL_IMAGE)
        .map_or_else(|| site.social_image.clone(), str::to_string);

    Normalized {
        source: source.to_path_buf(),
        title,
        slug,
        excerpt,
        published_date,
        status,
        tags,
        seo_title,
        seo_description,
        canonical_url,
        social_image_url,
        body: raw.body,
        body_line: raw.body_line,
    }
}

fn first_scalar<'a>(meta: &'a super::Metadata, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| meta.scalar(key))
}

/// Text of the first `# ` heading line.
fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First prose line: not blank, not a heading, not a fence.
fn derive_excerpt(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("```"))
        .map(truncate_excerpt)
}

fn truncate_excerpt(line: &str) -> String {
    if line.chars().count() <= EXCERPT_LIMIT {
        return line.to_string();
    }
    let keep = EXCERPT_LIMIT - ELLIPSIS.len();
    let mut excerpt: String = line.chars().take(keep).collect();
    excerpt.push_str(ELLIPSIS);
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::document::frontmatter::parse;

    const TODAY: &str = "2024-07-04";

    fn run(text: &str, file: &str) -> Normalized {
        let config = test_parse_config("");
        normalize(parse(text).unwrap(), Path::new(file), &config, TODAY)
    }

    #[test]
    fn test_title_from_metadata() {
        let doc = run("---\ntitle: Given\n---\n# Heading", "content/x.md");
        assert_eq!(doc.title, "Given");
    }

    #[test]
    fn test_title_from_first_heading() {
        let doc = run("Intro line\n\n# Title Line\n\n## Sub", "content/x.md");
        assert_eq!(doc.title, "Title Line");
    }

    #[test]
    fn test_title_from_file_name() {
        let doc = run("No heading here.", "content/cloud-native-design.md");
        assert_eq!(doc.title, "Cloud Native Design");
        assert_eq!(doc.slug, "cloud-native-design");
    }

    #[test]
    fn test_slug_from_messy_file_name() {
        let doc = run("Body", "content/My Post_2024!.md");
        assert_eq!(doc.slug, "my-post-2024");
    }

    #[test]
    fn test_metadata_slug_is_not_rewritten() {
        let doc = run("---\nslug: Bad Slug!\n---\nBody", "content/a.md");
        assert_eq!(doc.slug, "Bad Slug!");
    }

    #[test]
    fn test_excerpt_skips_headings_and_fences() {
        let doc = run("# Title\n\n```rust\nlet x = 1;\n```\n\nFirst prose.", "a.md");
        // the fence line is skipped, but the code line inside it is prose-like
        assert_eq!(doc.excerpt, "let x = 1;");

        let doc = run("# Title\n\n## Sub\n\nFirst prose.\n\nSecond.", "a.md");
        assert_eq!(doc.excerpt, "First prose.");
    }

    #[test]
    fn test_excerpt_is_truncated() {
        let long = "a".repeat(400);
        let doc = run(&long, "a.md");
        assert_eq!(doc.excerpt.chars().count(), EXCERPT_LIMIT);
        assert!(doc.excerpt.ends_with("..."));
        assert!(doc.excerpt.starts_with(&"a".repeat(277)));

        let exact = "b".repeat(280);
        assert_eq!(run(&exact, "a.md").excerpt, exact);
    }

    #[test]
    fn test_excerpt_truncation_counts_chars() {
        let long = "é".repeat(300);
        let doc = run(&long, "a.md");
        assert_eq!(doc.excerpt.chars().count(), EXCERPT_LIMIT);
    }

    #[test]
    fn test_excerpt_falls_back_to_config() {
        let config = test_parse_config("default_excerpt = \"Nothing to see.\"");
        let doc = normalize(parse("# Only a heading").unwrap(), Path::new("a.md"), &config, TODAY);
        assert_eq!(doc.excerpt, "Nothing to see.");

        let doc = run("# Only a heading", "a.md");
        assert_eq!(doc.excerpt, "");
    }

    #[test]
    fn test_date_status_and_tags_defaults() {
        let doc = run("Body", "a.md");
        assert_eq!(doc.published_date, TODAY);
        assert_eq!(doc.status, "draft");
        assert_eq!(doc.tags, vec!["Architecture".to_string()]);
    }

    #[test]
    fn test_published_date_aliases() {
        let doc = run("---\npublishedAt: 2024-01-01\n---\nBody", "a.md");
        assert_eq!(doc.published_date, "2024-01-01");
        let doc = run("---\npublishedDate: 2024-02-02\n---\nBody", "a.md");
        assert_eq!(doc.published_date, "2024-02-02");
    }

    #[test]
    fn test_tags_given_as_scalar_are_ignored() {
        let doc = run("---\ntags: Cloud\n---\nBody", "a.md");
        assert_eq!(doc.tags, vec!["Architecture".to_string()]);

        let doc = run("---\ntags:\n---\nBody", "a.md");
        assert_eq!(doc.tags, vec!["Architecture".to_string()]);

        let doc = run("---\ntags:\n  - Cloud\n  - DX\n---\nBody", "a.md");
        assert_eq!(doc.tags, vec!["Cloud".to_string(), "DX".to_string()]);
    }

    #[test]
    fn test_seo_defaults() {
        let doc = run("---\ntitle: Hello\nexcerpt: Short.\n---\nBody", "content/hello.md");
        assert_eq!(doc.seo_title, "Hello | Test");
        assert_eq!(doc.seo_description, "Short.");
        assert_eq!(doc.canonical_url, "https://example.com/blog/hello.html");
        assert_eq!(doc.social_image_url, "https://example.com/og.png");
    }

    #[test]
    fn test_seo_overrides() {
        let doc = run(
            "---\nseoTitle: Custom\nseoDescription: Desc\ncanonicalUrl: https://x.io/a\nogImage: https://x.io/i.png\n---\nBody",
            "a.md",
        );
        assert_eq!(doc.seo_title, "Custom");
        assert_eq!(doc.seo_description, "Desc");
        assert_eq!(doc.canonical_url, "https://x.io/a");
        assert_eq!(doc.social_image_url, "https://x.io/i.png");
    }

    #[test]
    fn test_list_for_scalar_key_is_absent() {
        let doc = run("---\ntitle:\n  - a\n---\n# From Body", "a.md");
        assert_eq!(doc.title, "From Body");
    }

    #[test]
    fn test_body_and_line_are_kept() {
        let doc = run("---\ntitle: T\n---\n\nBody", "a.md");
        assert_eq!(doc.body, "Body");
        assert_eq!(doc.body_line, 5);
    }
}
