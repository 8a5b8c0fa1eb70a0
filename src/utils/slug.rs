//! Slug helpers shared by the normalizer and config validation.

use regex::Regex;
use std::sync::LazyLock;

/// Lowercase, collapse every run of non `[a-z0-9]` characters into a single
/// `-`, and strip leading/trailing dashes.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Cloud Native_Design"), "cloud-native-design");
/// assert_eq!(slugify("--Hello,  World!--"), "hello-world");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Check the slug grammar: `[a-z0-9]+(-[a-z0-9]+)*`.
pub fn is_valid_slug(slug: &str) -> bool {
    static RE_SLUG: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
    RE_SLUG.is_match(slug)
}

/// Turn a slug back into a display title: split on `-`, capitalize each part.
///
/// `cloud-native-design` -> `Cloud Native Design`
pub fn titleize(slug: &str) -> String {
    slug.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("cloud-native-design"), "cloud-native-design");
        assert_eq!(slugify("Cloud Native Design"), "cloud-native-design");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("DX_Strategy (2024)"), "dx-strategy-2024");
    }

    #[test]
    fn test_slugify_strips_edges() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("café-notes"), "caf-notes");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("cloud-native-design"));
        assert!(is_valid_slug("a1"));
        assert!(!is_valid_slug("Bad Slug!"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("cloud-native-design"), "Cloud Native Design");
        assert_eq!(titleize("single"), "Single");
        assert_eq!(titleize("v2-notes"), "V2 Notes");
    }
}
