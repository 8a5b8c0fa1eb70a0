//! `[print]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [print]
//! html_dir = "tmp/pdfs"        # Intermediate print HTML (relative to site root)
//! output = "output/pdf"        # Final PDFs (relative to site root)
//! browser = "~/bin/chromium"   # Optional; searched on PATH when unset
//! jobs = 4                     # Concurrent renderer processes
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSection {
    pub html_dir: PathBuf,
    pub output: PathBuf,
    pub browser: Option<PathBuf>,
    pub jobs: usize,
}

impl Default for PrintSection {
    fn default() -> Self {
        Self {
            html_dir: "tmp/pdfs".into(),
            output: "output/pdf".into(),
            browser: None,
            jobs: default_jobs(),
        }
    }
}

/// Half the available cores, at least one.
fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| (n.get() / 2).max(1))
        .unwrap_or(1)
}

impl PrintSection {
    pub const JOBS: FieldPath = FieldPath::new("print.jobs");
    pub const BROWSER: FieldPath = FieldPath::new("print.browser");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.jobs == 0 {
            diag.error_with_hint(Self::JOBS, "must be at least 1", "e.g. jobs = 4");
        }
        if let Some(browser) = &self.browser
            && !browser.exists()
        {
            diag.warn(
                Self::BROWSER,
                format!("`{}` does not exist", browser.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_jobs_positive() {
        assert!(PrintSection::default().jobs >= 1);
    }

    #[test]
    fn test_parse_print_section() {
        let config = test_parse_config("[print]\nhtml_dir = \"tmp/print\"\njobs = 2");
        assert_eq!(config.print.html_dir, PathBuf::from("tmp/print"));
        assert_eq!(config.print.output, PathBuf::from("output/pdf"));
        assert_eq!(config.print.jobs, 2);
        assert!(config.print.browser.is_none());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let print = PrintSection {
            jobs: 0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        print.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, PrintSection::JOBS);
    }

    #[test]
    fn test_missing_browser_is_warning() {
        let print = PrintSection {
            browser: Some("/no/such/browser".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        print.validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }
}
