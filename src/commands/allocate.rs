//! Allocate command
//!
//! Runs the word allocator once and reports what it picked.

use crate::allocator::{Allocation, Quota};
use crate::config::GameConfig;
use crate::game::{CategorySource, Dealer};
use crate::repository::{CategoryRepository, LevelError};

/// One allocation and the settings that produced it
#[derive(Debug, Clone)]
pub struct AllocationReport {
    pub source: CategorySource,
    pub quota: Quota,
    pub shuffle_intensity: f64,
    pub allocation: Allocation,
}

/// Allocate words for `source` under `config`
///
/// # Errors
/// Returns [`LevelError`] if `source` names a level that does not exist.
pub fn run_allocate(
    repository: &CategoryRepository,
    config: &GameConfig,
    source: CategorySource,
    seed: Option<u64>,
) -> Result<AllocationReport, LevelError> {
    let mut dealer = Dealer::new(repository, source, seed)?;
    let allocation = dealer.allocate(config);

    Ok(AllocationReport {
        source: dealer.source().clone(),
        quota: config.quota(),
        shuffle_intensity: config.shuffle_intensity,
        allocation,
    })
}
