// Vocabulary input types: what the loader hands to the compiler.
//
// A VocabularySet is an ordered list of categories; its order is the order
// results are reported in. Categories share nothing with each other.

use serde::{Deserialize, Serialize};

/// One vocabulary entry: the phrase to look for, plus a label that is carried
/// along for reporting but not used in counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub key: String,
    pub label: String,
}

impl PhraseEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// A named topical vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub phrases: Vec<PhraseEntry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phrases: Vec::new(),
        }
    }

    /// Build a category from bare phrase keys with empty labels.
    pub fn with_phrases<I, S>(name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            phrases: keys
                .into_iter()
                .map(|key| PhraseEntry::new(key, String::new()))
                .collect(),
        }
    }

    /// Insert or update a phrase. A repeated key keeps its first position and
    /// takes the newest label.
    pub fn upsert(&mut self, entry: PhraseEntry) {
        match self.phrases.iter_mut().find(|p| p.key == entry.key) {
            Some(existing) => existing.label = entry.label,
            None => self.phrases.push(entry),
        }
    }
}

/// The full set of categories for one analysis session, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySet {
    pub categories: Vec<Category>,
}

impl VocabularySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

impl FromIterator<Category> for VocabularySet {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
