// Default tokenizer: Unicode word boundaries (UAX #29).
//
// Punctuation survives as its own token, so "carbon, tax" is three tokens and
// will not match the phrase "carbon tax". Whitespace runs are dropped.

use unicode_segmentation::UnicodeSegmentation;

use super::traits::Tokenizer;
use crate::error::TokenizeError;

/// Word-boundary tokenizer. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text
            .split_word_bounds()
            .filter(|segment| !segment.chars().all(char::is_whitespace))
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        WordTokenizer.tokenize(text).unwrap()
    }

    #[test]
    fn test_splits_words_and_punctuation() {
        assert_eq!(
            tokens("our carbon emissions fell."),
            vec!["our", "carbon", "emissions", "fell", "."]
        );
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(tokens("  \n\t ").is_empty());
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_comma_separates_tokens() {
        assert_eq!(tokens("carbon, tax"), vec!["carbon", ",", "tax"]);
    }

    #[test]
    fn test_keeps_contractions_and_decimals_whole() {
        assert_eq!(tokens("don't cut 3.5 tonnes"), vec!["don't", "cut", "3.5", "tonnes"]);
    }

    #[test]
    fn test_non_ascii_words() {
        assert_eq!(tokens("nachhaltigkeit übergreifend"), vec!["nachhaltigkeit", "übergreifend"]);
    }
}
