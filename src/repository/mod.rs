//! Category data sources
//!
//! Holds the category → word-list data the allocator draws from, plus the built-in
//! level definitions that decide which categories a board requests.

mod embedded;
pub mod levels;
pub mod loader;

use crate::core::{Category, CategoryId};
use rustc_hash::FxHashMap;

pub use embedded::{EMBEDDED_CATEGORIES, EMBEDDED_DELIMITER};
pub use levels::{LEVELS, Level, LevelError};
pub use loader::{ParseReport, RepositoryError, load_from_file, parse_delimited};

/// In-memory store of categories, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct CategoryRepository {
    categories: Vec<Category>,
    index: FxHashMap<CategoryId, usize>,
}

impl CategoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from categories
    ///
    /// Categories sharing a name are combined, keeping the first one's position.
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut repository = Self::new();
        for category in categories {
            repository.insert(category);
        }
        repository
    }

    /// The category data bundled with the binary (every built-in level's categories)
    ///
    /// # Examples
    /// ```
    /// use word_groups::repository::CategoryRepository;
    ///
    /// let repository = CategoryRepository::embedded();
    /// assert!(repository.get("Colors").is_some());
    /// ```
    #[must_use]
    pub fn embedded() -> Self {
        parse_delimited(EMBEDDED_CATEGORIES, EMBEDDED_DELIMITER).repository
    }

    /// Add a category, appending its words if the name already exists
    pub fn insert(&mut self, category: Category) {
        if let Some(&i) = self.index.get(category.id()) {
            for word in category.words() {
                self.categories[i].push(word.clone());
            }
        } else {
            self.index.insert(category.id().clone(), self.categories.len());
            self.categories.push(category);
        }
    }

    pub(crate) fn push_word(&mut self, category: &str, word: String) {
        if let Some(&i) = self.index.get(category) {
            self.categories[i].push(word);
        } else {
            self.insert(Category::new(category, [word]));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.index.get(name.trim()).map(|&i| &self.categories[i])
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of words across all categories
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_merges_same_name() {
        let repository = CategoryRepository::from_categories([
            Category::new("Colors", ["Red"]),
            Category::new("Fruits", ["Apple"]),
            Category::new("Colors", ["Blue"]),
        ]);

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.categories()[0].name(), "Colors");
        assert_eq!(repository.get("Colors").unwrap().words(), &["Red", "Blue"]);
        assert_eq!(repository.word_count(), 3);
    }

    #[test]
    fn get_trims_name() {
        let repository = CategoryRepository::from_categories([Category::new("Birds", ["Owl"])]);
        assert!(repository.get(" Birds ").is_some());
        assert!(repository.get("Fish").is_none());
    }

    #[test]
    fn embedded_covers_every_level() {
        let repository = CategoryRepository::embedded();
        for level in &LEVELS {
            for name in level.categories {
                let category = repository
                    .get(name)
                    .unwrap_or_else(|| panic!("Level {} category '{name}' missing", level.number));
                assert!(
                    category.len() >= 8,
                    "Category '{name}' has only {} words",
                    category.len()
                );
            }
        }
    }
}
