//! Bundled category data
//!
//! `category,word` lines compiled into the binary so the game runs without any files.

/// Default category source, one `category,word` pair per line
pub const EMBEDDED_CATEGORIES: &str = include_str!("../../data/categories.csv");

/// Delimiter used by [`EMBEDDED_CATEGORIES`]
pub const EMBEDDED_DELIMITER: char = ',';
