// Adapter over a pre-trained `tokenizer.json` (HuggingFace tokenizers).
//
// Only the pre-tokenizer stage is used. The model stage produces subword
// pieces ("tax" + "##ation"), which would let the phrase "tax" match inside
// "taxation". Pre-tokenizer splits are word-level, so matching stays full-token.

use std::path::Path;

use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};
use tracing::debug;

use super::traits::Tokenizer;
use crate::error::{TokenizeError, VocabularyError};

/// Space markers that byte-level and metaspace pre-tokenizers glue onto words.
const SPACE_MARKERS: [char; 2] = ['\u{0120}', '\u{2581}'];

/// Word-level tokenizer backed by a loaded `tokenizer.json`.
pub struct PretrainedTokenizer {
    inner: tokenizers::Tokenizer,
}

impl PretrainedTokenizer {
    /// Load a tokenizer definition from disk.
    ///
    /// Fails with `TokenizerUnavailable` if the file is missing, cannot be
    /// parsed, or defines no pre-tokenizer.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        if !path.exists() {
            return Err(VocabularyError::TokenizerUnavailable(format!(
                "tokenizer file not found: {}",
                path.display()
            )));
        }

        let inner = tokenizers::Tokenizer::from_file(path).map_err(|e| {
            VocabularyError::TokenizerUnavailable(format!(
                "failed to load {}: {e}",
                path.display()
            ))
        })?;

        if inner.get_pre_tokenizer().is_none() {
            return Err(VocabularyError::TokenizerUnavailable(format!(
                "{} defines no pre-tokenizer",
                path.display()
            )));
        }

        debug!("Loaded pre-trained tokenizer from {}", path.display());
        Ok(Self { inner })
    }
}

impl Tokenizer for PretrainedTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let pre_tokenizer = self
            .inner
            .get_pre_tokenizer()
            .ok_or_else(|| TokenizeError("no pre-tokenizer configured".to_string()))?;

        let mut pretokenized = PreTokenizedString::from(text);
        pre_tokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| TokenizeError(e.to_string()))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Char)
            .into_iter()
            .map(|(split, _, _)| split.trim_start_matches(SPACE_MARKERS).trim())
            .filter(|split| !split.is_empty())
            .map(str::to_string)
            .collect())
    }
}
