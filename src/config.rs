//! Game configuration
//!
//! One [`GameConfig`] carries every tunable of the allocator, board and session. It can
//! be read from JSON (missing fields take their defaults) and is validated before use.

use crate::allocator::Quota;
use crate::board::BoardShape;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("shuffle_intensity must be within [0, 1], got {0}")]
    ShuffleIntensity(f64),

    #[error("min_words_per_category ({min}) must not exceed max_words_per_category ({max})")]
    QuotaRange { min: usize, max: usize },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// All game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Field separator of category source files
    pub delimiter: char,
    /// 0 keeps words grouped by category, 1 scatters them fully
    pub shuffle_intensity: f64,
    pub min_words_per_category: usize,
    pub max_words_per_category: usize,
    pub total_word_count: usize,
    pub row_capacity: usize,
    pub max_rows: usize,
    pub starting_lives: u32,
    /// How long rejected tiles stay red
    pub penalty_flash_ms: u64,
    /// Interactive rows at or below which the board counts as solved
    pub win_row_threshold: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            shuffle_intensity: 1.0,
            min_words_per_category: 4,
            max_words_per_category: 8,
            total_word_count: 40,
            row_capacity: 4,
            max_rows: 10,
            starting_lives: 3,
            penalty_flash_ms: 2000,
            win_row_threshold: 1,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] if the file cannot be read
    /// or is not valid JSON; validation errors for out-of-range values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.shuffle_intensity) {
            return Err(ConfigError::ShuffleIntensity(self.shuffle_intensity));
        }
        if self.min_words_per_category > self.max_words_per_category {
            return Err(ConfigError::QuotaRange {
                min: self.min_words_per_category,
                max: self.max_words_per_category,
            });
        }
        if self.row_capacity == 0 {
            return Err(ConfigError::Zero("row_capacity"));
        }
        if self.max_rows == 0 {
            return Err(ConfigError::Zero("max_rows"));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Zero("starting_lives"));
        }
        Ok(())
    }

    #[must_use]
    pub const fn quota(&self) -> Quota {
        Quota::new(
            self.min_words_per_category,
            self.max_words_per_category,
            self.total_word_count,
        )
    }

    #[must_use]
    pub const fn board_shape(&self) -> BoardShape {
        BoardShape {
            row_capacity: self.row_capacity,
            max_rows: self.max_rows,
            win_row_threshold: self.win_row_threshold,
        }
    }

    #[must_use]
    pub const fn penalty_flash(&self) -> Duration {
        Duration::from_millis(self.penalty_flash_ms)
    }
}
