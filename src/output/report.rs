// Result sink: one result file per document.
//
// Text format (the default) is one "category: count" line per category in
// compiled order, written to `<output_dir>/<document>_category_counts.txt`.
// JSON adds the document name, a timestamp, and the total.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::engine::counts::CategoryCounts;

/// On-disk format for per-document results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// JSON body for one document's results.
#[derive(Debug, Serialize)]
pub struct DocumentReport<'a> {
    pub document: &'a str,
    pub generated_at: DateTime<Utc>,
    pub total: u64,
    pub counts: &'a CategoryCounts,
}

/// Writes per-document result files into a fixed output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    format: ReportFormat,
}

impl ReportWriter {
    /// Prepare the writer, creating `output_dir` if it does not exist yet.
    pub fn create(output_dir: &Path, format: ReportFormat) -> Result<Self> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).with_context(|| {
                format!("Failed to create output directory {}", output_dir.display())
            })?;
            info!(dir = %output_dir.display(), "Created output directory");
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            format,
        })
    }

    /// Where the results for `document` will be written.
    pub fn path_for(&self, document: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{document}_category_counts.{}",
            self.format.extension()
        ))
    }

    /// Write one document's counts. Returns the written path.
    pub fn write(&self, document: &str, counts: &CategoryCounts) -> Result<PathBuf> {
        let body = match self.format {
            ReportFormat::Text => render_text(counts),
            ReportFormat::Json => {
                let report = DocumentReport {
                    document,
                    generated_at: Utc::now(),
                    total: counts.total(),
                    counts,
                };
                serde_json::to_string_pretty(&report)?
            }
        };

        let path = self.path_for(document);
        fs::write(&path, body)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        Ok(path)
    }
}

/// Render counts as `category: count` lines.
pub fn render_text(counts: &CategoryCounts) -> String {
    counts
        .iter()
        .map(|(category, count)| format!("{category}: {count}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryCounts {
        serde_json::from_str(r#"[{"category":"Climate","count":2},{"category":"Social","count":1}]"#)
            .unwrap()
    }

    #[test]
    fn test_render_text_lines() {
        assert_eq!(render_text(&sample()), "Climate: 2\nSocial: 1\n");
    }

    #[test]
    fn test_write_text_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        let writer = ReportWriter::create(&out, ReportFormat::Text).unwrap();

        let path = writer.write("report.pdf", &sample()).unwrap();
        assert_eq!(path, out.join("report.pdf_category_counts.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Climate: 2\nSocial: 1\n");
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::create(dir.path(), ReportFormat::Json).unwrap();

        let path = writer.write("report.pdf", &sample()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["document"], "report.pdf");
        assert_eq!(value["total"], 3);
        assert_eq!(value["counts"][0]["category"], "Climate");
        assert_eq!(value["counts"][1]["count"], 1);
    }
}
