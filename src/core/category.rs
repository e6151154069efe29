//! Category representation
//!
//! A category is a named group of semantically related words ("Colors", "Planets", ...).

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of a category, cheap to clone and usable as a map key
///
/// Tiles carry one of these instead of a free-form tag string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(Arc<str>);

impl CategoryId {
    /// Create a category id from a name (surrounding whitespace is trimmed)
    ///
    /// # Examples
    /// ```
    /// use word_groups::core::CategoryId;
    ///
    /// let id = CategoryId::new("  Colors ");
    /// assert_eq!(id.as_str(), "Colors");
    /// ```
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref().trim()))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A named category and its ordered member words
///
/// Words are trimmed and empty entries are dropped on construction, so every
/// stored word is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    words: Vec<String>,
}

impl Category {
    /// Create a category from a name and its words
    ///
    /// # Examples
    /// ```
    /// use word_groups::core::Category;
    ///
    /// let colors = Category::new("Colors", ["Red", " Blue ", ""]);
    /// assert_eq!(colors.words(), &["Red", "Blue"]);
    /// ```
    pub fn new<I, S>(name: impl AsRef<str>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            id: CategoryId::new(name),
            words,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether a word is a member (exact, case-sensitive match)
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub(crate) fn push(&mut self, word: String) {
        self.words.push(word);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} words)", self.id, self.words.len())
    }
}
