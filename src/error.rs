// Error taxonomy for the counting core.
//
// Two failure classes matter to callers: a vocabulary failure kills the whole
// session (no category is usable), a matching failure kills one document.
// Everything on the I/O side of the crate uses anyhow instead.

use thiserror::Error;

/// A tokenizer could not process a piece of text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("tokenization failed: {0}")]
pub struct TokenizeError(pub String);

/// Malformed or conflicting vocabulary input at compile time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("category '{name}' is defined more than once")]
    DuplicateCategory { name: String },

    #[error("category name must not be empty")]
    EmptyCategoryName,

    #[error("tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),

    #[error("failed to tokenize phrase '{phrase}' in category '{category}': {source}")]
    PhraseTokenization {
        category: String,
        phrase: String,
        #[source]
        source: TokenizeError,
    },
}

/// Tokenization or matching failure while counting one document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("chunk {chunk} could not be tokenized: {source}")]
    Tokenize {
        chunk: usize,
        #[source]
        source: TokenizeError,
    },
}

impl MatchingError {
    /// Index of the chunk that failed, if the failure is tied to one.
    pub fn chunk(&self) -> Option<usize> {
        match self {
            Self::Tokenize { chunk, .. } => Some(*chunk),
            Self::InvalidChunkSize => None,
        }
    }
}

/// A matching failure tagged with the document it happened in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("document '{document}' aborted: {source}")]
pub struct DocumentError {
    pub document: String,
    #[source]
    pub source: MatchingError,
}
