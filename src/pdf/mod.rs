//! HTML to PDF rendering.
//!
//! The print orchestrator only talks to [`PdfRenderer`]; the engine behind it
//! is opaque. [`ChromeRenderer`] drives a headless Chromium per document.

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::utils::exec::{Cmd, FilterRule};

/// Executables tried in order when `print.browser` is unset.
const BROWSER_CANDIDATES: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

/// Chromium chatter on stderr that says nothing about the render.
static BROWSER_FILTER: FilterRule = FilterRule::new(&["[", "Fontconfig", "DevTools listening"]);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no browser found (tried {}); set `print.browser` or pass --browser", BROWSER_CANDIDATES.join(", "))]
    BrowserNotFound,

    #[error("browser `{}` does not exist", .0.display())]
    BrowserMissing(PathBuf),

    #[error("print HTML path `{}` is not absolute", .0.display())]
    InvalidPath(PathBuf),

    #[error("{0:#}")]
    Command(anyhow::Error),

    #[error("renderer exited cleanly but wrote no `{}`", .0.display())]
    NoOutput(PathBuf),
}

/// Blocking request/response collaborator: one HTML file in, one PDF out.
pub trait PdfRenderer: Sync {
    fn render_to_pdf(&self, html: &Path, pdf: &Path) -> Result<(), RenderError>;
}

#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    browser: PathBuf,
}

impl ChromeRenderer {
    /// Use `configured` when given, else the first candidate on `PATH`.
    ///
    /// `configured` is expected to be tilde-expanded already (config loading
    /// does that).
    pub fn resolve(configured: Option<&Path>) -> Result<Self, RenderError> {
        let browser = match configured {
            Some(path) if path.exists() => path.to_path_buf(),
            Some(path) => return Err(RenderError::BrowserMissing(path.to_path_buf())),
            None => BROWSER_CANDIDATES
                .iter()
                .find_map(|name| which::which(name).ok())
                .ok_or(RenderError::BrowserNotFound)?,
        };
        Ok(Self { browser })
    }

    pub fn browser(&self) -> &Path {
        &self.browser
    }

    fn args(html: &Path, pdf: &Path) -> Result<Vec<String>, RenderError> {
        let url = Url::from_file_path(html).map_err(|()| RenderError::InvalidPath(html.to_path_buf()))?;
        Ok(vec![
            "--headless=new".to_owned(),
            "--disable-gpu".to_owned(),
            "--allow-file-access-from-files".to_owned(),
            "--print-to-pdf-no-header".to_owned(),
            format!("--print-to-pdf={}", pdf.display()),
            url.to_string(),
        ])
    }
}

impl PdfRenderer for ChromeRenderer {
    fn render_to_pdf(&self, html: &Path, pdf: &Path) -> Result<(), RenderError> {
        Cmd::new(&self.browser)
            .args(Self::args(html, pdf)?)
            .filter(&BROWSER_FILTER)
            .run()
            .map_err(RenderError::Command)?;

        if !pdf.exists() {
            return Err(RenderError::NoOutput(pdf.to_path_buf()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_args() {
        let args = ChromeRenderer::args(Path::new("/tmp/pdfs/a b.html"), Path::new("/out/a.pdf")).unwrap();
        assert_eq!(args[0], "--headless=new");
        assert_eq!(args[4], "--print-to-pdf=/out/a.pdf");
        assert_eq!(args[5], "file:///tmp/pdfs/a%20b.html");
    }

    #[test]
    fn test_relative_html_rejected() {
        let err = ChromeRenderer::args(Path::new("tmp/a.html"), Path::new("a.pdf")).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPath(_)));
    }

    #[test]
    fn test_configured_browser_must_exist() {
        let err = ChromeRenderer::resolve(Some(Path::new("/no/such/chromium"))).unwrap_err();
        assert!(matches!(err, RenderError::BrowserMissing(_)));
    }

    #[test]
    fn test_configured_browser_used() {
        let dir = tempfile::TempDir::new().unwrap();
        let browser = dir.path().join("chrome");
        std::fs::write(&browser, "").unwrap();
        let renderer = ChromeRenderer::resolve(Some(&browser)).unwrap();
        assert_eq!(renderer.browser(), browser);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_browser_is_command_error() {
        let renderer = ChromeRenderer {
            browser: PathBuf::from("false"),
        };
        let err = renderer
            .render_to_pdf(Path::new("/tmp/a.html"), Path::new("/tmp/folio-none.pdf"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Command(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_output_detected() {
        let renderer = ChromeRenderer {
            browser: PathBuf::from("true"),
        };
        let err = renderer
            .render_to_pdf(Path::new("/tmp/a.html"), Path::new("/tmp/folio-never-written.pdf"))
            .unwrap_err();
        assert!(matches!(err, RenderError::NoOutput(_)));
    }
}
