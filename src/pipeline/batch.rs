// Batch pipeline: count every document in a collection against one compiled
// vocabulary.
//
// Strategy: extraction and counting are CPU-bound, so each document runs on
// the blocking pool with a bounded number in flight. Results are written to
// the sink sequentially as they arrive. A failing document (including one
// whose result file cannot be written) is logged and recorded; it never stops
// the rest of the batch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::documents::{extract_text, DocumentSource};
use crate::engine::counts::CategoryCounts;
use crate::engine::matching::{count_categories, EngineOptions};
use crate::error::DocumentError;
use crate::output::report::ReportWriter;
use crate::vocabulary::compiler::CompiledVocabulary;

/// Counts for one successfully processed document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    pub document: String,
    pub counts: CategoryCounts,
    /// Result file, when a sink was configured.
    pub output: Option<PathBuf>,
}

/// A document that could not be processed, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub document: String,
    pub error: String,
}

/// Outcome of a batch, both lists sorted by document name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub succeeded: Vec<DocumentResult>,
    pub failures: Vec<DocumentFailure>,
}

/// Extract and count a single document.
///
/// Matching failures come back as a `DocumentError` carrying the document
/// name; extraction failures keep their own context.
pub fn analyze_document(
    doc: &DocumentSource,
    vocabulary: &CompiledVocabulary,
    options: &EngineOptions,
) -> Result<CategoryCounts> {
    let text = extract_text(doc)?;
    let counts = count_categories(&text, vocabulary, options).map_err(|source| DocumentError {
        document: doc.name.clone(),
        source,
    })?;
    Ok(counts)
}

/// Run the whole batch.
///
/// Extraction, counting, and result-file failures are all per-document: they
/// end up in `BatchReport::failures` and the batch carries on.
pub async fn run(
    documents: Vec<DocumentSource>,
    vocabulary: Arc<CompiledVocabulary>,
    options: EngineOptions,
    sink: Option<&ReportWriter>,
    concurrency: usize,
) -> Result<BatchReport> {
    let total = documents.len();
    info!(documents = total, concurrency, "Starting batch");

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("  Documents [{bar:30}] {pos}/{len} ({eta})")
    {
        pb.set_style(style);
    }

    let mut results = stream::iter(documents.into_iter().map(|doc| {
        let vocabulary = Arc::clone(&vocabulary);
        async move {
            let name = doc.name.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                analyze_document(&doc, &vocabulary, &options)
            })
            .await
            .map_err(|e| anyhow::anyhow!("Worker for {name} failed: {e}"))
            .and_then(|inner| inner);
            (name, outcome)
        }
    }))
    .buffer_unordered(concurrency.max(1));

    let mut report = BatchReport::default();
    while let Some((document, outcome)) = results.next().await {
        let written = outcome.and_then(|counts| {
            let output = sink
                .map(|writer| writer.write(&document, &counts))
                .transpose()?;
            Ok((counts, output))
        });
        match written {
            Ok((counts, output)) => {
                info!(
                    document = %document,
                    total = counts.total(),
                    "Document counted"
                );
                report.succeeded.push(DocumentResult {
                    document,
                    counts,
                    output,
                });
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(document = %document, error = %error, "Document failed, skipping");
                report.failures.push(DocumentFailure { document, error });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    report.succeeded.sort_by(|a, b| a.document.cmp(&b.document));
    report.failures.sort_by(|a, b| a.document.cmp(&b.document));

    info!(
        succeeded = report.succeeded.len(),
        failed = report.failures.len(),
        "Batch complete"
    );
    Ok(report)
}
