//! Print build orchestration.
//!
//! Every document (drafts included) gets a standalone print page in
//! `print.html_dir`, which the [`PdfRenderer`] turns into
//! `{print.output}/{slug}.pdf`. Renders run on a pool of `print.jobs`
//! threads. A failed render is logged and the rest continue; the run fails
//! afterwards if any document failed.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::common::{LoadedDocument, ensure_unique_slugs, load_all};
use crate::config::SiteConfig;
use crate::logger::ProgressLine;
use crate::pdf::{ChromeRenderer, PdfRenderer, RenderError};
use crate::render::{Page, Renderer};
use crate::utils::plural_count;
use crate::{debug, log};

/// One document's print outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub slug: String,
    pub html: PathBuf,
    pub pdf: PathBuf,
}

/// Write print pages, then render PDFs unless `html_only`.
pub fn print_documents(config: &SiteConfig, html_only: bool) -> Result<()> {
    let jobs = write_print_pages(config)?;

    if html_only {
        log!("print"; "{} in {}", plural_count(jobs.len(), "page"),
            config.root_relative(&config.print.html_dir).display());
        return Ok(());
    }

    let renderer = ChromeRenderer::resolve(config.print.browser.as_deref())?;
    debug!("pdf"; "using {}", renderer.browser().display());
    render_pdfs(config, &jobs, &renderer)
}

/// Load, check and write `{print.html_dir}/{slug}.html` for every document.
pub fn write_print_pages(config: &SiteConfig) -> Result<Vec<PrintJob>> {
    let loaded = load_all(config)?;
    ensure_unique_slugs(loaded.iter().map(|l| &l.document), config)?;

    let html_dir = &config.print.html_dir;
    fs::create_dir_all(html_dir)
        .with_context(|| format!("Failed to create {}", html_dir.display()))?;

    let renderer = Renderer::new(config);
    loaded
        .par_iter()
        .map(|l| write_print_page(&renderer, l, config))
        .collect()
}

fn write_print_page(renderer: &Renderer<'_>, loaded: &LoadedDocument, config: &SiteConfig) -> Result<PrintJob> {
    let doc = &loaded.document;
    let page = Page::Print {
        document: doc,
        body: &loaded.body,
    };

    let path = config.print.html_dir.join(doc.file_name("html"));
    fs::write(&path, renderer.render(&page))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("page"; "{:?} {}", page.target(), doc.slug);

    Ok(PrintJob {
        slug: doc.slug.clone(),
        html: path,
        pdf: config.print.output.join(doc.file_name("pdf")),
    })
}

/// Render every job on a pool bounded by `print.jobs`.
pub fn render_pdfs(config: &SiteConfig, jobs: &[PrintJob], renderer: &dyn PdfRenderer) -> Result<()> {
    let output = &config.print.output;
    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.print.jobs)
        .build()
        .context("Failed to create PDF render pool")?;

    let progress = ProgressLine::new("print", &[("pdf", jobs.len())]);
    let results: Vec<Result<(), RenderError>> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let result = renderer.render_to_pdf(&job.html, &job.pdf);
                progress.inc("pdf");
                result
            })
            .collect()
    });
    progress.finish();

    let failed = report_failures(jobs, &results);
    if failed > 0 {
        bail!("{} of {} failed to render", plural_count(failed, "PDF"), jobs.len());
    }

    log!("pdf"; "{} in {}", plural_count(jobs.len(), "file"), config.root_relative(output).display());
    Ok(())
}

fn report_failures(jobs: &[PrintJob], results: &[Result<(), RenderError>]) -> usize {
    let mut failed = 0;
    for (job, result) in jobs.iter().zip(results) {
        if let Err(err) = result {
            failed += 1;
            log!("error"; "{}: {}", job.slug, err);
        }
    }
    failed
}
