//! Built-in levels
//!
//! A level is just the set of categories a board requests; everything else comes from
//! the game configuration.

use crate::core::CategoryId;

/// A built-in level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// 1-based level number
    pub number: usize,
    pub categories: &'static [&'static str],
}

/// Requested level does not exist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("level {requested} does not exist (available: 1-{available})")]
pub struct LevelError {
    pub requested: usize,
    pub available: usize,
}

/// All built-in levels, in play order
pub const LEVELS: [Level; 5] = [
    Level {
        number: 1,
        categories: &[
            "Numbers",
            "Colors",
            "Animals",
            "Body Parts",
            "Fruits",
            "Birds",
            "Countries",
            "Family",
        ],
    },
    Level {
        number: 2,
        categories: &[
            "Birds",
            "Weather",
            "Sports",
            "Languages",
            "Foods",
            "Occupation",
            "Stationery",
            "Beverages",
        ],
    },
    Level {
        number: 3,
        categories: &[
            "Dances",
            "Months",
            "Currencies",
            "Greek Letters",
            "Planets",
            "Weapons",
            "Chemistry",
            "Furniture",
        ],
    },
    Level {
        number: 4,
        categories: &[
            "Fish",
            "Boy",
            "Birds",
            "Accessories",
            "Ocean Life",
            "Shapes",
            "Zodiac Sign",
            "Emotions",
        ],
    },
    Level {
        number: 5,
        categories: &[
            "Astronomy",
            "Weather",
            "Superheroes",
            "City",
            "Flowers",
            "Music Genre",
            "Dogs",
            "Marriage",
        ],
    },
];

impl Level {
    /// Look up a level by its 1-based number
    #[must_use]
    pub fn get(number: usize) -> Option<&'static Self> {
        number.checked_sub(1).and_then(|i| LEVELS.get(i))
    }

    /// Look up a level, reporting how many exist if it does not
    ///
    /// # Errors
    ///
    /// Returns `LevelError` when `number` is 0 or past the last level.
    pub fn require(number: usize) -> Result<&'static Self, LevelError> {
        Self::get(number).ok_or(LevelError {
            requested: number,
            available: LEVELS.len(),
        })
    }

    /// The level after this one, if any
    #[must_use]
    pub fn next(&self) -> Option<&'static Self> {
        Self::get(self.number + 1)
    }

    #[must_use]
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|&name| CategoryId::new(name)).collect()
    }
}
