//! folio - markdown publishing pipeline.
//!
//! One set of markdown sources, two outputs: a web section (listing, pages,
//! sitemap) and print-ready PDFs.

mod address;
mod cli;
mod config;
mod document;
mod embed;
mod generator;
mod logger;
mod markdown;
mod pdf;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config).map(|_| ()),
        Commands::Print { print_args } => cli::print::print_documents(&config, print_args.html_only),
        Commands::Check { .. } => cli::check::check_documents(&config).map(|_| ()),
    }
}
