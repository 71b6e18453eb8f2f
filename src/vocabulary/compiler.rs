// Vocabulary compiler: turns phrase lists into per-category token tries.
//
// Every phrase key goes through the same normalization and tokenizer as the
// documents, so "Carbon Tax" becomes the token path ["carbon", "tax"]. At match
// time the engine walks each category's trie from every token position and
// counts each terminal node it passes: nested and overlapping hits within a
// category are all reported, and categories never see each other's hits.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use super::types::VocabularySet;
use crate::error::VocabularyError;
use crate::tokenize::traits::Tokenizer;

/// Case normalization applied to both phrase keys and document text.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: HashMap<String, usize>,
    terminal: bool,
}

/// Token-level phrase matcher for a single category.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    nodes: Vec<TrieNode>,
    patterns: usize,
    longest: usize,
}

impl Default for PhraseMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseMatcher {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            patterns: 0,
            longest: 0,
        }
    }

    /// Add a tokenized phrase. Returns false if the exact token sequence was
    /// already present (or empty), in which case nothing changes.
    pub fn insert(&mut self, tokens: &[String]) -> bool {
        if tokens.is_empty() {
            return false;
        }

        let mut node = 0;
        for token in tokens {
            let existing = self.nodes[node].children.get(token).copied();
            node = match existing {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(token.clone(), next);
                    next
                }
            };
        }

        if self.nodes[node].terminal {
            return false;
        }
        self.nodes[node].terminal = true;
        self.patterns += 1;
        self.longest = self.longest.max(tokens.len());
        true
    }

    /// Number of distinct token patterns in this matcher.
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Length in tokens of the longest pattern (0 when empty).
    pub fn longest_pattern(&self) -> usize {
        self.longest
    }

    /// Count pattern hits in `tokens`.
    ///
    /// A hit is any (start, length) span equal to a pattern. Hits whose end
    /// falls inside the first `carried` tokens are skipped; those tokens were
    /// already matched as the tail of the previous chunk.
    pub fn count_matches(&self, tokens: &[String], carried: usize) -> u64 {
        if self.patterns == 0 {
            return 0;
        }

        let mut hits = 0;
        for start in 0..tokens.len() {
            let mut node = 0;
            for (offset, token) in tokens[start..].iter().enumerate() {
                match self.nodes[node].children.get(token.as_str()) {
                    Some(&next) => node = next,
                    None => break,
                }
                if self.nodes[node].terminal && start + offset + 1 > carried {
                    hits += 1;
                }
            }
        }
        hits
    }
}

/// One category's compiled matcher, tagged with its name.
#[derive(Debug, Clone)]
pub struct CompiledCategory {
    pub name: String,
    pub matcher: PhraseMatcher,
}

/// Immutable, matcher-ready form of a whole vocabulary set.
///
/// Built once per session and shared read-only (usually behind an `Arc`)
/// across every document in a batch.
pub struct CompiledVocabulary {
    categories: Vec<CompiledCategory>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for CompiledVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledVocabulary")
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

impl CompiledVocabulary {
    /// Compiled categories in insertion order.
    pub fn categories(&self) -> &[CompiledCategory] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Longest phrase across all categories, in tokens.
    pub fn longest_phrase_tokens(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.matcher.longest_pattern())
            .max()
            .unwrap_or(0)
    }
}

/// Compile a vocabulary set into one matcher per category.
///
/// Keys that are blank, or that tokenize to nothing, are skipped with a
/// warning. Any other problem aborts the whole compilation: a partial
/// vocabulary would silently under-report.
pub fn compile(
    set: &VocabularySet,
    tokenizer: Arc<dyn Tokenizer>,
) -> Result<CompiledVocabulary, VocabularyError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut categories = Vec::with_capacity(set.categories.len());

    for category in &set.categories {
        if category.name.trim().is_empty() {
            return Err(VocabularyError::EmptyCategoryName);
        }
        if !seen.insert(category.name.as_str()) {
            return Err(VocabularyError::DuplicateCategory {
                name: category.name.clone(),
            });
        }

        let mut matcher = PhraseMatcher::new();
        for entry in &category.phrases {
            let key = entry.key.trim();
            if key.is_empty() {
                warn!(category = %category.name, "Skipping blank phrase key");
                continue;
            }

            let tokens = tokenizer.tokenize(&normalize(key)).map_err(|source| {
                VocabularyError::PhraseTokenization {
                    category: category.name.clone(),
                    phrase: entry.key.clone(),
                    source,
                }
            })?;

            if tokens.is_empty() {
                warn!(
                    category = %category.name,
                    phrase = key,
                    "Phrase produced no tokens, skipping"
                );
                continue;
            }
            matcher.insert(&tokens);
        }

        info!(
            category = %category.name,
            phrases = category.phrases.len(),
            patterns = matcher.pattern_count(),
            "Compiled category"
        );

        categories.push(CompiledCategory {
            name: category.name.clone(),
            matcher,
        });
    }

    Ok(CompiledVocabulary {
        categories,
        tokenizer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenizeError;
    use crate::tokenize::words::WordTokenizer;
    use crate::vocabulary::types::{Category, PhraseEntry};

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_matcher_counts_repeats() {
        let mut m = PhraseMatcher::new();
        m.insert(&toks("water"));
        assert_eq!(m.count_matches(&toks("water water water"), 0), 3);
    }

    #[test]
    fn test_matcher_counts_nested_patterns() {
        let mut m = PhraseMatcher::new();
        m.insert(&toks("carbon"));
        m.insert(&toks("carbon tax"));
        m.insert(&toks("tax"));
        // carbon, carbon tax, tax
        assert_eq!(m.count_matches(&toks("a carbon tax"), 0), 3);
    }

    #[test]
    fn test_matcher_ignores_duplicate_pattern() {
        let mut m = PhraseMatcher::new();
        assert!(m.insert(&toks("labor rights")));
        assert!(!m.insert(&toks("labor rights")));
        assert_eq!(m.pattern_count(), 1);
        assert_eq!(m.count_matches(&toks("labor rights"), 0), 1);
    }

    #[test]
    fn test_matcher_skips_hits_inside_carry() {
        let mut m = PhraseMatcher::new();
        m.insert(&toks("carbon tax"));
        m.insert(&toks("carbon"));
        // "carbon" ends at 1 (inside the carried prefix), "carbon tax" ends at 2
        assert_eq!(m.count_matches(&toks("carbon tax"), 1), 1);
    }

    #[test]
    fn test_matcher_empty_never_matches() {
        let m = PhraseMatcher::new();
        assert_eq!(m.count_matches(&toks("anything at all"), 0), 0);
        assert_eq!(m.longest_pattern(), 0);
    }

    #[test]
    fn test_compile_rejects_duplicate_category() {
        let set: VocabularySet = vec![
            Category::with_phrases("Env", ["water"]),
            Category::with_phrases("Env", ["air"]),
        ]
        .into_iter()
        .collect();

        let err = compile(&set, Arc::new(WordTokenizer)).unwrap_err();
        assert_eq!(
            err,
            VocabularyError::DuplicateCategory {
                name: "Env".to_string()
            }
        );
    }

    #[test]
    fn test_compile_rejects_blank_category_name() {
        let set: VocabularySet = vec![Category::with_phrases("  ", ["water"])]
            .into_iter()
            .collect();
        assert_eq!(
            compile(&set, Arc::new(WordTokenizer)).unwrap_err(),
            VocabularyError::EmptyCategoryName
        );
    }

    #[test]
    fn test_compile_skips_blank_keys() {
        let mut cat = Category::new("Env");
        cat.upsert(PhraseEntry::new("   ", "blank"));
        cat.upsert(PhraseEntry::new("water", "w"));
        let set: VocabularySet = vec![cat].into_iter().collect();

        let compiled = compile(&set, Arc::new(WordTokenizer)).unwrap();
        assert_eq!(compiled.categories()[0].matcher.pattern_count(), 1);
    }

    #[test]
    fn test_compile_lowercases_keys() {
        let set: VocabularySet = vec![Category::with_phrases("Climate", ["Carbon Tax", "carbon tax"])]
            .into_iter()
            .collect();
        let compiled = compile(&set, Arc::new(WordTokenizer)).unwrap();
        let matcher = &compiled.categories()[0].matcher;
        assert_eq!(matcher.pattern_count(), 1);
        assert_eq!(compiled.longest_phrase_tokens(), 2);
    }

    struct BrokenTokenizer;

    impl Tokenizer for BrokenTokenizer {
        fn tokenize(&self, _text: &str) -> Result<Vec<String>, TokenizeError> {
            Err(TokenizeError("broken".to_string()))
        }
    }

    #[test]
    fn test_compile_fails_on_tokenizer_error() {
        let set: VocabularySet = vec![Category::with_phrases("Env", ["water"])]
            .into_iter()
            .collect();
        let err = compile(&set, Arc::new(BrokenTokenizer)).unwrap_err();
        assert!(matches!(err, VocabularyError::PhraseTokenization { .. }));
    }
}
