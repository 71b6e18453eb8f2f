// Tokenizer trait: swap-ready abstraction.
//
// Phrase keys and document chunks must go through the same implementation,
// otherwise multi-word phrases stop lining up with document tokens. The
// default splits on Unicode word boundaries; a pre-trained tokenizer.json can
// be swapped in without touching the engine.

use crate::error::TokenizeError;

/// Turns already-lowercased text into a token stream.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into tokens, in order. Whitespace never produces a token.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}
