//! Embedded page shells.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `web` - Shared shell for the listing and document pages
//! - `print` - Self-contained A4 page with inlined stylesheet
//!
//! # Usage
//!
//! ```ignore
//! use embed::web::{SHELL_HTML, ShellVars};
//!
//! let html = SHELL_HTML.render(&vars);
//! ```
//!
//! Every value handed to a template is inserted as is; callers escape.

mod template;

pub use template::{Template, TemplateVars, substitute};

pub mod web {
    use super::{Template, TemplateVars, substitute};

    /// Variables for shell.html.
    pub struct ShellVars<'a> {
        pub lang: &'a str,
        pub title: &'a str,
        pub description: &'a str,
        pub canonical: &'a str,
        /// `website` or `article`
        pub og_type: &'a str,
        pub og_image: &'a str,
        pub stylesheet: &'a str,
        pub script: &'a str,
        pub site_name: &'a str,
        pub nav_prefix: &'a str,
        /// Pre-rendered `<a>` elements.
        pub nav: &'a str,
        pub footer: &'a str,
        /// Attributes on `<body>`, e.g. `data-analytics-page="blog_list"`.
        pub body_attrs: &'a str,
        pub content: &'a str,
    }

    impl TemplateVars for ShellVars<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(
                content,
                &[
                    ("LANG", self.lang),
                    ("TITLE", self.title),
                    ("DESCRIPTION", self.description),
                    ("CANONICAL", self.canonical),
                    ("OG_TYPE", self.og_type),
                    ("OG_IMAGE", self.og_image),
                    ("STYLESHEET", self.stylesheet),
                    ("SCRIPT", self.script),
                    ("SITE_NAME", self.site_name),
                    ("NAV_PREFIX", self.nav_prefix),
                    ("NAV", self.nav),
                    ("FOOTER", self.footer),
                    ("BODY_ATTRS", self.body_attrs),
                    ("CONTENT", self.content),
                ],
            )
        }
    }

    /// Page shell shared by listing and document pages.
    pub const SHELL_HTML: Template<ShellVars<'static>> =
        Template::new(include_str!("web/shell.html"));
}

pub mod print {
    use super::{Template, TemplateVars, substitute};

    /// Stylesheet inlined into every print page.
    pub const PRINT_CSS: &str = include_str!("print/print.css");

    /// Variables for page.html.
    pub struct PrintVars<'a> {
        pub lang: &'a str,
        pub title: &'a str,
        pub excerpt: &'a str,
        /// `YYYY-MM-DD`
        pub date: &'a str,
        pub long_date: &'a str,
        /// Pre-rendered `<span class="tag">` elements.
        pub tags: &'a str,
        pub content: &'a str,
    }

    impl TemplateVars for PrintVars<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(
                content,
                &[
                    ("LANG", self.lang),
                    ("TITLE", self.title),
                    ("EXCERPT", self.excerpt),
                    ("DATE", self.date),
                    ("LONG_DATE", self.long_date),
                    ("TAGS", self.tags),
                    ("STYLES", PRINT_CSS.trim_end()),
                    ("CONTENT", self.content),
                ],
            )
        }
    }

    /// Self-contained print page.
    pub const PAGE_HTML: Template<PrintVars<'static>> =
        Template::new(include_str!("print/page.html"));
}
