//! Auxiliary output generators.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`)

pub mod sitemap;

use std::borrow::Cow;

/// Minify XML content if enabled.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        let xml_str = std::str::from_utf8(content).unwrap_or("");
        let minified = xml_str
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("");
        Cow::Owned(minified.into_bytes())
    } else {
        Cow::Borrowed(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_xml() {
        let xml = b"<?xml version=\"1.0\"?>\n<urlset>\n\n  <url>  <loc>a b</loc>  </url>\n</urlset>\n";
        assert_eq!(
            &*minify_xml(xml, true),
            b"<?xml version=\"1.0\"?><urlset><url>  <loc>a b</loc>  </url></urlset>"
        );
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let xml = b"<a>\n  <b/>\n</a>";
        assert!(matches!(minify_xml(xml, false), Cow::Borrowed(_)));
    }
}
