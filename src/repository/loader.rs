//! Delimited category source parsing
//!
//! Each non-blank line is `category<delimiter>word`. Malformed lines are skipped with a
//! warning and never abort the load.

use super::CategoryRepository;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Error loading a category source
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to read category source {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of parsing a category source
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub repository: CategoryRepository,
    /// 1-based line numbers that were skipped as malformed
    pub skipped_lines: Vec<usize>,
}

/// Parse `category<delimiter>word` lines into a repository
///
/// Blank lines and lines without a delimiter are skipped. Lines whose category or word
/// is empty after trimming are skipped with a warning. Fields past the second are ignored.
///
/// # Examples
/// ```
/// use word_groups::repository::parse_delimited;
///
/// let report = parse_delimited("Colors;Red\nColors;Blue\n;Orphan\nFruits;Apple\n", ';');
/// assert_eq!(report.repository.len(), 2);
/// assert_eq!(report.skipped_lines, vec![3]);
/// ```
#[must_use]
pub fn parse_delimited(text: &str, delimiter: char) -> ParseReport {
    let mut report = ParseReport::default();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(delimiter);
        let (Some(category), Some(word)) = (fields.next(), fields.next()) else {
            debug!(line = i + 1, "Skipping line without delimiter");
            report.skipped_lines.push(i + 1);
            continue;
        };

        let category = category.trim();
        let word = word.trim();
        if category.is_empty() || word.is_empty() {
            warn!(line = i + 1, content = line, "Skipping malformed line");
            report.skipped_lines.push(i + 1);
            continue;
        }

        report.repository.push_word(category, word.to_string());
    }

    debug!(
        categories = report.repository.len(),
        words = report.repository.word_count(),
        skipped = report.skipped_lines.len(),
        "Category source parsed"
    );

    report
}

/// Load a category source from a file
///
/// # Errors
///
/// Returns `RepositoryError::Io` if the file cannot be read.
pub fn load_from_file<P: AsRef<Path>>(
    path: P,
    delimiter: char,
) -> Result<CategoryRepository, RepositoryError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let report = parse_delimited(&content, delimiter);
    tracing::info!(
        path = %path.display(),
        categories = report.repository.len(),
        "Categories loaded"
    );

    Ok(report.repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_groups_by_category_in_first_seen_order() {
        let report = parse_delimited("Fruits,Apple\nColors,Red\nFruits,Pear\n", ',');
        let repository = report.repository;

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.categories()[0].name(), "Fruits");
        assert_eq!(repository.categories()[1].name(), "Colors");
        assert_eq!(repository.get("Fruits").unwrap().words(), &["Apple", "Pear"]);
        assert!(report.skipped_lines.is_empty());
    }

    #[test]
    fn parse_trims_fields_and_handles_crlf() {
        let report = parse_delimited(" Colors , Red \r\nColors,Blue\r\n", ',');
        assert_eq!(
            report.repository.get("Colors").unwrap().words(),
            &["Red", "Blue"]
        );
    }

    #[test]
    fn parse_skips_blank_and_malformed_lines() {
        let text = "\n   \nColors,Red\nno delimiter here\n,Orphan\nColors,  \nColors,Blue\n";
        let report = parse_delimited(text, ',');

        assert_eq!(report.repository.get("Colors").unwrap().len(), 2);
        assert_eq!(report.skipped_lines, vec![4, 5, 6]);
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let report = parse_delimited("Colors,Red,ignored,also ignored\n", ',');
        assert_eq!(report.repository.get("Colors").unwrap().words(), &["Red"]);
    }

    #[test]
    fn parse_custom_delimiter() {
        let report = parse_delimited("Body Parts|Knee\nBody Parts|Elbow\n", '|');
        assert_eq!(report.repository.get("Body Parts").unwrap().len(), 2);
    }

    #[test]
    fn parse_empty_input() {
        let report = parse_delimited("", ',');
        assert!(report.repository.is_empty());
        assert!(report.skipped_lines.is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load_from_file("definitely/not/here.csv", ',');
        assert!(matches!(result, Err(RepositoryError::Io { .. })));
    }

    #[test]
    fn load_from_file_reads_categories() {
        let path = std::env::temp_dir().join(format!(
            "word_groups_loader_test_{}.csv",
            std::process::id()
        ));
        fs::write(&path, "Planets;Mars\nPlanets;Venus\n").unwrap();

        let repository = load_from_file(&path, ';').unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(repository.get("Planets").unwrap().words(), &["Mars", "Venus"]);
    }
}
