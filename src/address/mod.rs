//! Output addressing.
//!
//! Every document is addressed by its slug: `{build.output}/{slug}.html`,
//! `{print.html_dir}/{slug}.html`, `{print.output}/{slug}.pdf` and
//! `{site.url}/{build.section}/{slug}.html`.
//!
//! - [`conflict`]: slug conflict detection (multiple sources -> same slug)

pub mod conflict;
