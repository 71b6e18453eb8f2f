// CategoryCounts: per-document tallies, in compiled category order.

use serde::{Deserialize, Serialize};

/// One category's tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Match counts for one document, ordered like the compiled vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    entries: Vec<CategoryCount>,
}

impl CategoryCounts {
    /// Start every named category at zero.
    pub fn zeroed<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| CategoryCount {
                    category: name.to_string(),
                    count: 0,
                })
                .collect(),
        }
    }

    /// Add `hits` to the category at position `index`.
    pub(crate) fn add(&mut self, index: usize, hits: u64) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.count += hits;
        }
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
    }

    /// `(category, count)` pairs in stable category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|e| (e.category.as_str(), e.count))
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
