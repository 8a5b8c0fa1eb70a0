//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Source/output paths, shell assets, sitemap |
//! | `print` | `[print]`    | Print HTML, PDF output, renderer         |
//! | `site`  | `[site]`     | Brand, URL, defaults, nav, CTAs          |

mod build;
mod print;
mod site;

pub use build::BuildSection;
pub use print::PrintSection;
pub use site::{CtaPlacement, SiteSection};
