// Document text source: finds input documents and extracts their full text.
//
// PDFs go through pdf-extract (pages concatenated in order). Plain `.txt`
// files are read as UTF-8 when enabled. The engine only ever sees the final
// String; it never streams page by page.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Kind of input file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    fn from_path(path: &Path, include_text: bool) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("pdf") => Some(Self::Pdf),
            Some("txt") if include_text => Some(Self::Text),
            _ => None,
        }
    }
}

/// One input document: its file name (used as the identifier) and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSource {
    pub name: String,
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl DocumentSource {
    /// Build a source for a single file, inferring the kind from its
    /// extension. Unknown extensions are read as plain text.
    pub fn from_path(path: &Path) -> Self {
        let kind = DocumentKind::from_path(path, true).unwrap_or(DocumentKind::Text);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path: path.to_path_buf(),
            kind,
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// List the documents in `dir`, sorted by file name.
///
/// Always picks up `*.pdf`; `*.txt` only when `include_text` is set.
pub fn discover_documents(dir: &Path, include_text: bool) -> Result<Vec<DocumentSource>> {
    if !dir.is_dir() {
        anyhow::bail!("Document directory not found: {}", dir.display());
    }

    let mut docs: Vec<DocumentSource> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read document directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let kind = DocumentKind::from_path(&path, include_text)?;
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some(DocumentSource { name, path, kind })
        })
        .collect();
    docs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(docs)
}

/// Extract the full text of one document.
pub fn extract_text(doc: &DocumentSource) -> Result<String> {
    match doc.kind {
        DocumentKind::Pdf => extract_pdf(&doc.path),
        DocumentKind::Text => fs::read_to_string(&doc.path)
            .with_context(|| format!("Failed to read {}", doc.path.display())),
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<String> {
    // pdf-extract panics on some malformed files instead of returning Err.
    match std::panic::catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(anyhow::anyhow!(
            "Failed to extract text from {}: {e}",
            path.display()
        )),
        Err(_) => anyhow::bail!("PDF parser crashed on {}", path.display()),
    }
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> Result<String> {
    anyhow::bail!(
        "Cannot read {}: built without the `pdf` feature",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("c.txt"), "text").unwrap();
        fs::write(dir.path().join("d.docx"), "nope").unwrap();

        let pdf_only = discover_documents(dir.path(), false).unwrap();
        let names: Vec<&str> = pdf_only.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);

        let with_text = discover_documents(dir.path(), true).unwrap();
        let names: Vec<&str> = with_text.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.txt"]);
        assert_eq!(with_text[2].kind, DocumentKind::Text);
    }

    #[test]
    fn test_discover_missing_dir_fails() {
        assert!(discover_documents(Path::new("/nonexistent/docs"), false).is_err());
    }

    #[test]
    fn test_extract_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, "Water scarcity").unwrap();

        let doc = DocumentSource::from_path(&path);
        assert_eq!(doc.name, "report.txt");
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(extract_text(&doc).unwrap(), "Water scarcity");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_extract_corrupt_pdf_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"definitely not a pdf").unwrap();

        let doc = DocumentSource::from_path(&path);
        assert!(extract_text(&doc).is_err());
    }
}
