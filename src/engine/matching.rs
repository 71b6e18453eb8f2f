// Chunked matching engine.
//
// Pipeline per document: lowercase the whole text, cut it into chunks,
// tokenize each chunk on its own, run every category matcher over the tokens,
// and add the hits to that category's running total.
//
// Under `BoundaryPolicy::Strict` chunks are cut every `chunk_size` characters
// and share nothing, so a phrase straddling a cut is not counted. `Carry`
// cuts on whitespace and prepends the tail of the previous chunk's tokens
// (one token shorter than the longest phrase), which recovers those phrases.

use tracing::debug;

use super::chunker::{chunks, DEFAULT_CHUNK_SIZE};
use super::counts::CategoryCounts;
use crate::error::MatchingError;
use crate::vocabulary::compiler::{normalize, CompiledVocabulary};

/// What happens to phrases that cross a chunk boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Hard character cuts, no look-behind. Straddling phrases are lost.
    #[default]
    Strict,
    /// Whitespace-snapped cuts plus a token carry-over between chunks.
    Carry,
}

/// Per-call knobs for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    pub boundary: BoundaryPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            boundary: BoundaryPolicy::Strict,
        }
    }
}

/// Count phrase hits per category in one document.
///
/// All-or-nothing: if any chunk fails to tokenize, the whole document fails
/// and no partial counts are returned.
pub fn count_categories(
    text: &str,
    vocabulary: &CompiledVocabulary,
    options: &EngineOptions,
) -> Result<CategoryCounts, MatchingError> {
    if options.chunk_size == 0 {
        return Err(MatchingError::InvalidChunkSize);
    }

    let mut counts = CategoryCounts::zeroed(vocabulary.category_names());
    let normalized = normalize(text);

    let carry_window = match options.boundary {
        BoundaryPolicy::Strict => 0,
        BoundaryPolicy::Carry => vocabulary.longest_phrase_tokens().saturating_sub(1),
    };
    let snap = options.boundary == BoundaryPolicy::Carry;
    let mut carry: Vec<String> = Vec::new();

    for (index, chunk) in chunks(&normalized, options.chunk_size, snap).enumerate() {
        let tokens = vocabulary
            .tokenizer()
            .tokenize(chunk)
            .map_err(|source| MatchingError::Tokenize {
                chunk: index,
                source,
            })?;

        let carried = carry.len();
        let stream = if carried == 0 {
            tokens
        } else {
            let mut stream = std::mem::take(&mut carry);
            stream.extend(tokens);
            stream
        };

        debug!(
            chunk = index,
            chars = chunk.chars().count(),
            tokens = stream.len(),
            carried,
            "Matching chunk"
        );

        for (slot, category) in vocabulary.categories().iter().enumerate() {
            counts.add(slot, category.matcher.count_matches(&stream, carried));
        }

        if carry_window > 0 {
            let keep = stream.len().min(carry_window);
            carry = stream[stream.len() - keep..].to_vec();
        }
    }

    Ok(counts)
}
