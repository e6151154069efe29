//! Word → category mapping produced by one allocation

use crate::core::CategoryId;
use rustc_hash::FxHashMap;

/// Mapping from word to category, iterated in insertion order
///
/// Words are unique keys. Inserting a word that is already present overwrites its
/// category in place (last write wins); two categories sharing a word is an accepted
/// limitation of the source data, not something the mapping repairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCategoryAssignment {
    entries: Vec<(String, CategoryId)>,
    index: FxHashMap<String, usize>,
}

impl WordCategoryAssignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word, returning the category it previously mapped to
    pub fn insert(&mut self, word: impl Into<String>, category: CategoryId) -> Option<CategoryId> {
        let word = word.into();
        if let Some(&i) = self.index.get(&word) {
            return Some(std::mem::replace(&mut self.entries[i].1, category));
        }
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, category));
        None
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<&CategoryId> {
        self.index.get(word).map(|&i| &self.entries[i].1)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryId)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories, in order of first appearance
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryId> {
        let mut seen: Vec<CategoryId> = Vec::new();
        for (_, category) in &self.entries {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        seen
    }

    /// Number of words mapped to `category`
    #[must_use]
    pub fn count_for(&self, category: &str) -> usize {
        self.entries
            .iter()
            .filter(|(_, c)| c.as_str() == category)
            .count()
    }
}

impl FromIterator<(String, CategoryId)> for WordCategoryAssignment {
    fn from_iter<T: IntoIterator<Item = (String, CategoryId)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (word, category) in iter {
            assignment.insert(word, category);
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str) -> CategoryId {
        CategoryId::new(name)
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut assignment = WordCategoryAssignment::new();
        assignment.insert("Red", cat("Colors"));
        assignment.insert("Apple", cat("Fruits"));
        assignment.insert("Blue", cat("Colors"));

        let words: Vec<&str> = assignment.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["Red", "Apple", "Blue"]);
        assert_eq!(assignment.categories(), vec![cat("Colors"), cat("Fruits")]);
        assert_eq!(assignment.count_for("Colors"), 2);
    }

    #[test]
    fn duplicate_word_last_write_wins_in_place() {
        let mut assignment = WordCategoryAssignment::new();
        assignment.insert("Ring", cat("Accessories"));
        assignment.insert("Veil", cat("Marriage"));
        let previous = assignment.insert("Ring", cat("Marriage"));

        assert_eq!(previous, Some(cat("Accessories")));
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.get("Ring"), Some(&cat("Marriage")));
        assert_eq!(assignment.iter().next().map(|(w, _)| w), Some("Ring"));
    }

    #[test]
    fn collect_from_pairs() {
        let assignment: WordCategoryAssignment = vec![
            ("Mars".to_string(), cat("Planets")),
            ("Venus".to_string(), cat("Planets")),
        ]
        .into_iter()
        .collect();

        assert_eq!(assignment.len(), 2);
        assert!(assignment.contains("Venus"));
        assert!(!assignment.contains("Pluto"));
    }
}
