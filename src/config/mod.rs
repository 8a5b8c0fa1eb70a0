//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build], [build.sitemap]
//! │   ├── print      # [print]
//! │   └── site       # [site], [site.listing], [[site.nav]], [[site.cta]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The loaded [`SiteConfig`] is passed explicitly to the normalizer, the
//! renderer and the orchestrators; there is no global handle.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSection, CtaPlacement, PrintSection, SiteSection};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands, PrintArgs},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub print: PrintSection,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.config_path = config_path;
        config.apply_cli(cli);
        config.resolve_paths(&root);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Unknown fields are not fatal; a typo should still be visible.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    // ========================================================================
    // paths and urls
    // ========================================================================

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root, for log output.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Sitemap output file.
    pub fn sitemap_path(&self) -> PathBuf {
        self.root_join(&self.build.sitemap.path)
    }

    /// Public URL of the listing page: `{site.url}/{section}/`.
    pub fn listing_url(&self) -> String {
        let base = self.site.base_url();
        match self.build.section.as_str() {
            "" => format!("{base}/"),
            section => format!("{base}/{section}/"),
        }
    }

    /// Public URL of a document page: `{site.url}/{section}/{slug}.html`.
    pub fn document_url(&self, slug: &str) -> String {
        format!("{}{slug}.html", self.listing_url())
    }

    /// Absolute location for a sitemap route.
    ///
    /// Routes that already carry a scheme are kept as is.
    pub fn route_url(&self, route: &str) -> String {
        if route.starts_with("http://") || route.starts_with("https://") {
            return route.to_string();
        }
        format!(
            "{}/{}",
            self.site.base_url(),
            route.trim_start_matches('/')
        )
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Print { print_args } => self.apply_print_args(print_args),
            Commands::Check { verbose } => crate::logger::set_verbose(*verbose),
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        Self::update_option(&mut self.site.url, args.site_url.as_ref());
    }

    fn apply_print_args(&mut self, args: &PrintArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.print.jobs, args.jobs.as_ref());
        if let Some(browser) = &args.browser {
            self.print.browser = Some(browser.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make every configured path absolute against `root`.
    fn resolve_paths(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.build.content = root.join(&self.build.content);
        self.build.output = root.join(&self.build.output);
        self.print.html_dir = root.join(&self.print.html_dir);
        self.print.output = root.join(&self.print.output);
        if let Some(browser) = self.print.browser.take() {
            self.print.browser = Some(Self::expand_path(&browser, root));
        }
    }

    /// Tilde expansion, then resolve relative to root.
    fn expand_path(path: &Path, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        if path.is_relative() {
            root.join(path)
        } else {
            path
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.print.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with the minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
///
/// `extra` continues the `[site]` table, so it may start with plain keys.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!(
        "[site]\nname = \"Test\"\nurl = \"https://example.com\"\n\
         social_image = \"https://example.com/og.png\"\n{extra}"
    );
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Like [`test_parse_config`], with every path resolved against `root`.
#[cfg(test)]
pub fn test_site_config(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(extra);
    config.config_path = root.join("folio.toml");
    config.resolve_paths(root);
    config
}

// ============================================================================
// tests
// ============================================================================
