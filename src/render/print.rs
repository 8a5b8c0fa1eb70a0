//! Print pages: one self-contained A4 sheet per document.

use super::indent;
use crate::config::SiteConfig;
use crate::document::Document;
use crate::embed::print::{PAGE_HTML, PrintVars};
use crate::markdown::ConvertedBody;
use crate::utils::date::long_date;
use crate::utils::html::{escape, escape_attr};

pub fn page(config: &SiteConfig, doc: &Document, body: &ConvertedBody) -> String {
    let tags: String = doc
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape(tag)))
        .collect();

    PAGE_HTML.render(&PrintVars {
        lang: &escape_attr(&config.site.language),
        title: &escape(&doc.title),
        excerpt: &escape(&doc.excerpt),
        date: &escape_attr(&doc.published_date),
        long_date: &escape(&long_date(&doc.published_date)),
        tags: &tags,
        content: &indent(&body.to_html(), 6),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::document::test_support::document;
    use crate::markdown::convert;

    #[test]
    fn test_print_page() {
        let config = test_parse_config("");
        let mut doc = document("cloud", "2024-06-01");
        doc.tags = vec!["Cloud".into(), "R&D".into()];
        let body = convert("## Section\n\n- a\n- b").unwrap();
        let html = page(&config, &doc, &body);

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>Title cloud</title>"));
        assert!(html.contains("@page { size: A4"));
        assert!(html.contains(r#"<p class="excerpt">Excerpt for cloud.</p>"#));
        assert!(html.contains(r#"<time datetime="2024-06-01">June 1, 2024</time>"#));
        assert!(html.contains(r#"<span class="tag">Cloud</span><span class="tag">R&amp;D</span>"#));
        assert!(html.contains("      <h2>Section</h2>\n      <ul>\n        <li>a</li>"));
    }

    #[test]
    fn test_print_page_keeps_code_verbatim() {
        let config = test_parse_config("");
        let body = convert("```\na\n  b\n```").unwrap();
        let html = page(&config, &document("code", "2024-06-01"), &body);

        assert!(html.contains("      <pre><code>a\n  b</code></pre>"));
    }

    #[test]
    fn test_print_page_has_no_site_chrome() {
        let config = test_parse_config("");
        let doc = document("x", "2024-01-01");
        let body = convert(&doc.body).unwrap();
        let html = page(&config, &doc, &body);

        assert!(!html.contains("site-header"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("__"));
    }
}
