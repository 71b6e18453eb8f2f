use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::engine::chunker::DEFAULT_CHUNK_SIZE;
use crate::engine::matching::{BoundaryPolicy, EngineOptions};
use crate::error::VocabularyError;
use crate::tokenize::pretrained::PretrainedTokenizer;
use crate::tokenize::traits::Tokenizer;
use crate::tokenize::words::WordTokenizer;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual fields after loading. Relative paths resolve against
/// the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory of `*.csv` category files
    pub category_dir: PathBuf,
    /// Directory of input documents
    pub document_dir: PathBuf,
    /// Where per-document result files go (created on demand)
    pub output_dir: PathBuf,
    /// Optional pre-trained `tokenizer.json`; the word-boundary tokenizer is used otherwise
    pub tokenizer_path: Option<PathBuf>,
    /// Chunk bound in characters
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category_dir: PathBuf::from("categories"),
            document_dir: PathBuf::from("Nachhaltigkeitsberichte"),
            output_dir: PathBuf::from("analysisOfWordFrequencies"),
            tokenizer_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chunk_size = match lookup("PHRASEFREQ_CHUNK_SIZE") {
            Some(raw) => parse_chunk_size(&raw)
                .with_context(|| format!("Invalid PHRASEFREQ_CHUNK_SIZE: {raw:?}"))?,
            None => defaults.chunk_size,
        };

        Ok(Self {
            category_dir: lookup("PHRASEFREQ_CATEGORY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.category_dir),
            document_dir: lookup("PHRASEFREQ_DOCUMENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.document_dir),
            output_dir: lookup("PHRASEFREQ_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            tokenizer_path: lookup("PHRASEFREQ_TOKENIZER")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            chunk_size,
        })
    }

    /// Engine options for this configuration.
    pub fn engine_options(&self, carry_boundaries: bool) -> EngineOptions {
        EngineOptions {
            chunk_size: self.chunk_size,
            boundary: if carry_boundaries {
                BoundaryPolicy::Carry
            } else {
                BoundaryPolicy::Strict
            },
        }
    }

    /// Build the tokenizer capability shared by compilation and matching.
    pub fn tokenizer(&self) -> Result<Arc<dyn Tokenizer>, VocabularyError> {
        match &self.tokenizer_path {
            Some(path) => Ok(Arc::new(PretrainedTokenizer::load(path)?)),
            None => Ok(Arc::new(WordTokenizer)),
        }
    }

    /// Check that the document directory exists.
    pub fn require_documents(&self) -> Result<()> {
        require_dir(&self.document_dir, "Document", "PHRASEFREQ_DOCUMENT_DIR")
    }

    /// Check that the category directory exists.
    pub fn require_categories(&self) -> Result<()> {
        require_dir(&self.category_dir, "Category", "PHRASEFREQ_CATEGORY_DIR")
    }
}

fn require_dir(dir: &Path, what: &str, var: &str) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!(
            "{what} directory not found: {}\n\
             Set {var} in your .env file or pass the matching flag.",
            dir.display()
        );
    }
    Ok(())
}

/// Parse a chunk size, rejecting zero.
pub fn parse_chunk_size(raw: &str) -> Result<usize> {
    let size: usize = raw.trim().parse().context("not a whole number")?;
    if size == 0 {
        anyhow::bail!("chunk size must be greater than zero");
    }
    Ok(size)
}
