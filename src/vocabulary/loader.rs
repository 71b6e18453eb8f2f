// CSV vocabulary source: one file per category.
//
// `categories/Climate.csv` becomes the category "Climate". The first row is a
// header. Column 0 holds the phrase, column 1 an optional label. Everything is
// trimmed here, before the compiler ever sees it.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::types::{Category, PhraseEntry, VocabularySet};

/// List the `*.csv` files in `dir`, sorted by file name.
pub fn discover_category_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Category directory not found: {}", dir.display());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read category directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();
    Ok(files)
}

/// Load every category file in `dir` into a vocabulary set.
pub fn load_category_dir(dir: &Path) -> Result<VocabularySet> {
    let files = discover_category_files(dir)?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "No category files found");
    }

    let mut set = VocabularySet::new();
    for path in &files {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Category file name is not valid UTF-8: {}", path.display()))?
            .to_string();

        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open category file {}", path.display()))?;
        let category = read_category(&name, file)
            .with_context(|| format!("Failed to parse category file {}", path.display()))?;

        info!(
            category = %category.name,
            phrases = category.phrases.len(),
            "Loaded category"
        );
        set.push(category);
    }

    Ok(set)
}

/// Parse one category from CSV content (header row first).
pub fn read_category<R: Read>(name: &str, reader: R) -> Result<Category> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut category = Category::new(name);
    // key -> position in `category.phrases`
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV at data row {}", row + 1))?;

        let key = record.get(0).unwrap_or("").trim();
        if key.is_empty() {
            debug!(category = name, row = row + 1, "Skipping row with empty phrase");
            continue;
        }
        let label = record.get(1).unwrap_or("").trim();
        match positions.get(key) {
            Some(&index) => category.phrases[index].label = label.to_string(),
            None => {
                positions.insert(key.to_string(), category.phrases.len());
                category.phrases.push(PhraseEntry::new(key, label));
            }
        }
    }

    Ok(category)
}
