//! Listing and single-document pages.
//!
//! `data-analytics-*` and `data-booking-type` attributes are read by the
//! site's browser scripts; their names are part of the page contract.

use super::indent;
use crate::config::{CtaPlacement, SiteConfig};
use crate::document::Document;
use crate::embed::web::{SHELL_HTML, ShellVars};
use crate::markdown::ConvertedBody;
use crate::utils::date::long_date;
use crate::utils::html::{escape, escape_attr};
use std::fmt::Write;

pub fn listing(config: &SiteConfig, documents: &[&Document]) -> String {
    let mut sorted = documents.to_vec();
    // stable: equal dates keep their input order
    sorted.sort_by(|a, b| b.published_date.cmp(&a.published_date));

    let listing = &config.site.listing;
    let mut content = String::new();

    content.push_str("      <section class=\"section blog-hero\">\n");
    content.push_str("        <div class=\"container narrow\">\n");
    if !listing.eyebrow.is_empty() {
        let _ = writeln!(content, "          <p class=\"eyebrow\">{}</p>", escape(&listing.eyebrow));
    }
    let _ = writeln!(content, "          <h1>{}</h1>", escape(&listing.heading));
    if !listing.lead.is_empty() {
        let _ = writeln!(content, "          <p class=\"lead\">{}</p>", escape(&listing.lead));
    }
    content.push_str(&cta_row(config, CtaPlacement::Listing, None, &[]));
    content.push_str("        </div>\n");
    content.push_str("      </section>\n\n");

    if !listing.topics.is_empty() {
        content.push_str(&topic_row(config));
    }

    content.push_str("      <section class=\"section\">\n");
    content.push_str("        <div class=\"container narrow blog-list\">\n");
    if sorted.is_empty() {
        content.push_str("          <p class=\"blog-empty\">No posts published yet.</p>\n");
    } else {
        let cards: Vec<_> = sorted.iter().map(|doc| card(doc)).collect();
        content.push_str(&cards.join("\n\n"));
        content.push('\n');
    }
    content.push_str("        </div>\n");
    content.push_str("      </section>");

    let description = if listing.description.is_empty() {
        &config.site.description
    } else {
        &listing.description
    };

    shell(
        config,
        &Meta {
            title: &listing.title,
            description,
            canonical: &config.listing_url(),
            og_type: "website",
            og_image: &config.site.social_image,
        },
        r#"data-analytics-page="blog_list""#,
        &content,
    )
}

pub fn single(config: &SiteConfig, doc: &Document, body: &ConvertedBody) -> String {
    let slug = escape_attr(&doc.slug);
    let eyebrow = doc
        .tags
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ");

    let back = format!(
        r#"<a class="btn btn-secondary" href="index.html">{}</a>"#,
        escape(&config.site.listing.back_label)
    );

    let mut content = String::new();
    content.push_str("      <article class=\"section blog-article\">\n");
    content.push_str("        <div class=\"container narrow\">\n");
    let _ = writeln!(content, "          <p class=\"eyebrow\">{}</p>", escape(&eyebrow));
    let _ = writeln!(content, "          <h1>{}</h1>", escape(&doc.title));
    let _ = writeln!(content, "          <p class=\"blog-meta\">{}</p>", time(&doc.published_date));
    content.push('\n');
    content.push_str(&indent(&body.to_html(), 10));
    content.push_str("\n\n");
    content.push_str(&cta_row(config, CtaPlacement::Article, Some(&slug), &[back]));
    content.push_str("        </div>\n");
    content.push_str("      </article>");

    let body_attrs = format!(r#"data-analytics-page="blog_post" data-analytics-slug="{slug}""#);

    shell(
        config,
        &Meta {
            title: &doc.seo_title,
            description: &doc.seo_description,
            canonical: &doc.canonical_url,
            og_type: "article",
            og_image: &doc.social_image_url,
        },
        &body_attrs,
        &content,
    )
}

/// Unescaped head metadata of one page.
struct Meta<'a> {
    title: &'a str,
    description: &'a str,
    canonical: &'a str,
    og_type: &'a str,
    og_image: &'a str,
}

fn shell(config: &SiteConfig, meta: &Meta<'_>, body_attrs: &str, content: &str) -> String {
    let site = &config.site;
    let build = &config.build;

    SHELL_HTML.render(&ShellVars {
        lang: &escape_attr(&site.language),
        title: &escape(meta.title),
        description: &escape_attr(meta.description),
        canonical: &escape_attr(meta.canonical),
        og_type: meta.og_type,
        og_image: &escape_attr(meta.og_image),
        stylesheet: &escape_attr(&build.stylesheet),
        script: &escape_attr(&build.script),
        site_name: &escape(&site.name),
        nav_prefix: &escape_attr(&build.nav_prefix),
        nav: &nav(config),
        footer: &escape(&site.footer),
        body_attrs,
        content,
    })
}

/// Header links; the one whose key matches the section is current.
fn nav(config: &SiteConfig) -> String {
    let prefix = escape_attr(&config.build.nav_prefix);
    config
        .site
        .nav
        .iter()
        .map(|link| {
            let current = if link.key == config.build.section {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"          <a href="{prefix}{}"{current}>{}</a>"#,
                escape_attr(&link.href),
                escape(&link.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// CTA buttons for `placement`, plus `extra` pre-rendered links.
///
/// Empty when there is nothing to show.
fn cta_row(
    config: &SiteConfig,
    placement: CtaPlacement,
    label: Option<&str>,
    extra: &[String],
) -> String {
    let mut links: Vec<String> = config
        .site
        .cta_for(placement)
        .map(|cta| {
            let mut a = format!(
                r#"<a class="btn {}" href="{}""#,
                if cta.primary { "btn-primary" } else { "btn-secondary" },
                escape_attr(&cta.href)
            );
            if let Some(kind) = &cta.kind {
                let _ = write!(a, r#" data-booking-type="{}""#, escape_attr(kind));
            }
            if let Some(event) = &cta.event {
                let _ = write!(a, r#" data-analytics-event="{}""#, escape_attr(event));
                if let Some(label) = label {
                    let _ = write!(a, r#" data-analytics-label="{label}""#);
                }
            }
            if is_external(&cta.href) {
                a.push_str(r#" target="_blank" rel="noopener""#);
            }
            let _ = write!(a, ">{}</a>", escape(&cta.label));
            a
        })
        .collect();
    links.extend(extra.iter().cloned());

    if links.is_empty() {
        return String::new();
    }

    let mut row = String::from("          <div class=\"cta-row\">\n");
    for link in links {
        let _ = writeln!(row, "            {link}");
    }
    row.push_str("          </div>\n");
    row
}

fn topic_row(config: &SiteConfig) -> String {
    let mut row = String::new();
    row.push_str("      <section class=\"section section-panel\">\n");
    row.push_str("        <div class=\"container narrow\">\n");
    row.push_str("          <div class=\"blog-filter-row\">\n");
    row.push_str("            <span class=\"filter-label\">Topics</span>\n");
    for topic in &config.site.listing.topics {
        let _ = writeln!(
            row,
            r#"            <a class="filter-chip" href="index.html" data-analytics-event="blog_filter_{}">{}</a>"#,
            escape_attr(&topic.key),
            escape(&topic.label)
        );
    }
    row.push_str("          </div>\n");
    row.push_str("        </div>\n");
    row.push_str("      </section>\n\n");
    row
}

fn card(doc: &Document) -> String {
    let slug = escape_attr(&doc.slug);
    let tags: String = doc
        .tags
        .iter()
        .map(|tag| format!("<li>{}</li>", escape(tag)))
        .collect();

    format!(
        r#"          <article class="blog-card">
            <p class="blog-meta">{time}</p>
            <h2><a href="{slug}.html" data-analytics-event="blog_post_open" data-analytics-label="{slug}">{title}</a></h2>
            <p>{excerpt}</p>
            <ul class="blog-tags">{tags}</ul>
          </article>"#,
        time = time(&doc.published_date),
        title = escape(&doc.title),
        excerpt = escape(&doc.excerpt),
    )
}

/// `<time datetime="2024-06-01">June 1, 2024</time>`
fn time(date: &str) -> String {
    format!(
        r#"<time datetime="{}">{}</time>"#,
        escape_attr(date),
        escape(&long_date(date))
    )
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::document::test_support::document;
    use crate::markdown::convert;

    fn config() -> SiteConfig {
        test_parse_config(
            "footer = \"Architecture-first.\"\n\
             [site.listing]\ntitle = \"Test Blog\"\neyebrow = \"Eyebrow\"\nheading = \"Heading\"\nlead = \"Lead\"\n\
             [[site.listing.topics]]\nlabel = \"DX Strategy\"\nkey = \"dx\"\n\
             [[site.nav]]\nlabel = \"Home\"\nhref = \"index.html\"\nkey = \"home\"\n\
             [[site.nav]]\nlabel = \"Blog\"\nhref = \"blog/index.html\"\nkey = \"blog\"\n\
             [[site.cta]]\nlabel = \"Book\"\nhref = \"https://cal.example.com\"\nkind = \"enterprise\"\nevent = \"cta_click\"\nprimary = true",
        )
    }

    #[test]
    fn test_listing_order_newest_first() {
        let config = config();
        let a = document("jan", "2024-01-01");
        let b = document("jun", "2024-06-01");
        let c = document("mar", "2024-03-01");
        let html = listing(&config, &[&a, &b, &c]);

        let pos = |slug: &str| html.find(&format!(r#"href="{slug}.html""#)).unwrap();
        assert!(pos("jun") < pos("mar"));
        assert!(pos("mar") < pos("jan"));
    }

    #[test]
    fn test_listing_equal_dates_keep_input_order() {
        let config = config();
        let a = document("first", "2024-01-01");
        let b = document("second", "2024-01-01");
        let html = listing(&config, &[&a, &b]);
        assert!(html.find("first.html").unwrap() < html.find("second.html").unwrap());
    }

    #[test]
    fn test_listing_card_content() {
        let config = config();
        let doc = document("cloud", "2024-06-01");
        let html = listing(&config, &[&doc]);

        assert!(html.contains(r#"<time datetime="2024-06-01">June 1, 2024</time>"#));
        assert!(html.contains(r#"data-analytics-event="blog_post_open" data-analytics-label="cloud""#));
        assert!(html.contains("<ul class=\"blog-tags\"><li>Architecture</li></ul>"));
        assert!(html.contains(r#"<body data-analytics-page="blog_list">"#));
        assert!(html.contains("<title>Test Blog</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/blog/" />"#));
        assert!(html.contains(r#"<meta property="og:type" content="website" />"#));
        assert!(html.contains(r#"<p class="eyebrow">Eyebrow</p>"#));
        assert!(html.contains(r#"data-analytics-event="blog_filter_dx">DX Strategy</a>"#));
    }

    #[test]
    fn test_listing_without_documents() {
        let html = listing(&config(), &[]);
        assert!(html.contains("No posts published yet."));
    }

    #[test]
    fn test_nav_marks_current_section() {
        let html = listing(&config(), &[]);
        assert!(html.contains(r#"<a href="../blog/index.html" aria-current="page">Blog</a>"#));
        assert!(html.contains(r#"<a href="../index.html">Home</a>"#));
    }

    #[test]
    fn test_single_page() {
        let config = config();
        let mut doc = document("cloud", "2024-06-01");
        doc.tags = vec!["A".into(), "B".into(), "C".into()];
        let body = convert(&doc.body).unwrap();
        let html = single(&config, &doc, &body);

        assert!(html.contains(r#"<p class="eyebrow">A | B</p>"#));
        assert!(html.contains("<h1>Title cloud</h1>"));
        assert!(html.contains("          <h1>Heading</h1>\n          <p>Body paragraph.</p>"));
        assert!(html.contains(r#"<title>Title cloud | Test</title>"#));
        assert!(html.contains(r#"<meta property="og:type" content="article" />"#));
        assert!(html.contains(r#"<body data-analytics-page="blog_post" data-analytics-slug="cloud">"#));
        assert!(html.contains(r#"<a class="btn btn-secondary" href="index.html">Back to Blog</a>"#));
        assert!(html.contains(r#"data-analytics-label="cloud" target="_blank" rel="noopener">Book</a>"#));
        assert!(html.contains("&copy; <span id=\"year\"></span> Test. Architecture-first."));
    }

    #[test]
    fn test_single_page_keeps_code_verbatim() {
        let config = config();
        let body = convert("Intro.\n\n```py\ndef f():\n    return 1\n```").unwrap();
        let html = single(&config, &document("code", "2024-06-01"), &body);

        assert!(html.contains(
            "          <pre><code class=\"language-py\">def f():\n    return 1</code></pre>"
        ));
    }

    #[test]
    fn test_cta_attributes() {
        let config = config();
        let row = cta_row(&config, CtaPlacement::Listing, None, &[]);
        assert_eq!(
            row,
            "          <div class=\"cta-row\">\n            \
             <a class=\"btn btn-primary\" href=\"https://cal.example.com\" data-booking-type=\"enterprise\" \
             data-analytics-event=\"cta_click\" target=\"_blank\" rel=\"noopener\">Book</a>\n          </div>\n"
        );
    }

    #[test]
    fn test_empty_cta_row() {
        let config = test_parse_config("");
        assert_eq!(cta_row(&config, CtaPlacement::Listing, None, &[]), "");
    }

    #[test]
    fn test_text_is_escaped() {
        let config = config();
        let mut doc = document("x", "2024-06-01");
        doc.title = "<b>Bold</b> & \"quoted\"".into();
        let html = listing(&config, &[&doc]);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; &quot;quoted&quot;"));
        assert!(!html.contains("<b>Bold</b>"));
    }

    #[test]
    fn test_placeholder_text_in_document_stays_literal() {
        let config = config();
        let mut doc = document("x", "2024-06-01");
        doc.body = "Mentions __TITLE__ literally.".into();
        let body = convert(&doc.body).unwrap();
        let html = single(&config, &doc, &body);
        assert!(html.contains("<p>Mentions __TITLE__ literally.</p>"));
    }
}
