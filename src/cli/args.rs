//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// folio markdown publishing CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the web section: listing, one page per published document, sitemap
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build print-ready HTML and PDFs for every document
    #[command(visible_alias = "p")]
    Print {
        #[command(flatten)]
        print_args: PrintArgs,
    },

    /// Load and validate all documents without writing anything
    #[command(visible_alias = "c")]
    Check {
        /// Enable verbose output for debugging
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Web build arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Minify the sitemap
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override site URL for deployment.
    ///
    /// Canonical links and sitemap locations are derived from it, so a
    /// staging build can point at its own host without editing folio.toml:
    ///   folio build --site-url "https://staging.example.com"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Print build arguments
#[derive(clap::Args, Debug, Clone)]
pub struct PrintArgs {
    /// Number of PDFs rendered in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Headless Chromium executable (default: first found on PATH)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub browser: Option<PathBuf>,

    /// Only write print HTML, skip PDF rendering
    #[arg(long)]
    pub html_only: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
