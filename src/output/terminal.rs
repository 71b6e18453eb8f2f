// Colored terminal output for category counts and batch summaries.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::engine::counts::CategoryCounts;
use crate::pipeline::batch::{BatchReport, DocumentFailure};
use crate::vocabulary::compiler::CompiledVocabulary;
use crate::vocabulary::types::VocabularySet;

/// Widest category column before names get truncated.
const CATEGORY_WIDTH: usize = 32;

/// Display one document's counts as a bar chart.
pub fn display_document_counts(document: &str, counts: &CategoryCounts) {
    println!("\n{}", format!("=== Category counts for {document} ===").bold());
    println!();

    if counts.is_empty() {
        println!("  No categories loaded.");
        return;
    }

    let max = counts.iter().map(|(_, c)| c).max().unwrap_or(0);
    let bar_width: usize = 20;

    for (category, count) in counts.iter() {
        let filled = if max == 0 {
            0
        } else {
            ((count as f64 / max as f64) * bar_width as f64).round() as usize
        };
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );

        println!(
            "  {:<width$} {} {:>8}",
            super::truncate_chars(category, CATEGORY_WIDTH).bold(),
            colorize_bar(bar, count),
            count,
            width = CATEGORY_WIDTH + 3,
        );
    }

    println!();
    println!("  Total matches: {}", counts.total());
}

/// Display the per-document totals of a batch, then any failures.
pub fn display_batch_summary(report: &BatchReport) {
    println!(
        "\n{}",
        format!(
            "=== Batch Summary ({} counted, {} failed) ===",
            report.succeeded.len(),
            report.failures.len()
        )
        .bold()
    );
    println!();

    if !report.succeeded.is_empty() {
        println!(
            "  {:<40} {:>8}  {}",
            "Document".dimmed(),
            "Matches".dimmed(),
            "Top category".dimmed(),
        );
        println!("  {}", "-".repeat(78).dimmed());

        for result in &report.succeeded {
            let top = result
                .counts
                .iter()
                .filter(|(_, count)| *count > 0)
                .max_by_key(|(_, count)| *count)
                .map(|(category, count)| format!("{category} ({count})"))
                .unwrap_or_else(|| "-".to_string());

            println!(
                "  {:<40} {:>8}  {}",
                super::truncate_chars(&result.document, 37),
                result.counts.total(),
                top,
            );
        }
        println!();
    }

    display_failures(&report.failures);
}

/// Display documents that could not be processed.
pub fn display_failures(failures: &[DocumentFailure]) {
    if failures.is_empty() {
        return;
    }

    println!("  {} {} documents failed:", "!!".red().bold(), failures.len());
    for failure in failures {
        println!(
            "    {} {}",
            failure.document.bold(),
            super::truncate_chars(&failure.error, 120).dimmed()
        );
    }
    println!();
}

/// Display the loaded categories with their phrase and pattern counts.
pub fn display_categories(set: &VocabularySet, compiled: &CompiledVocabulary) {
    println!(
        "\n{}",
        format!("=== Categories ({}) ===", set.len()).bold()
    );
    println!();

    if set.is_empty() {
        println!("  No category files found.");
        return;
    }

    println!(
        "  {:<width$} {:>8} {:>9}  {}",
        "Category".dimmed(),
        "Phrases".dimmed(),
        "Patterns".dimmed(),
        "Examples".dimmed(),
        width = CATEGORY_WIDTH,
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (category, compiled) in set.categories.iter().zip(compiled.categories()) {
        let examples: Vec<&str> = category
            .phrases
            .iter()
            .take(3)
            .map(|p| p.key.as_str())
            .collect();

        println!(
            "  {:<width$} {:>8} {:>9}  {}",
            super::truncate_chars(&category.name, CATEGORY_WIDTH),
            category.phrases.len(),
            compiled.matcher.pattern_count(),
            examples.join(", ").dimmed(),
            width = CATEGORY_WIDTH,
        );
    }
    println!();
}

fn colorize_bar(bar: String, count: u64) -> colored::ColoredString {
    if count == 0 {
        bar.dimmed()
    } else {
        bar.bright_green()
    }
}
