//! Word allocation
//!
//! Picks a balanced, shuffled subset of words from the requested categories:
//! per-category quotas first, then a per-category uniform shuffle, then a bounded
//! global shuffle whose strength is the `shuffle_intensity` knob.

mod assignment;
mod engine;
mod quota;

pub use assignment::WordCategoryAssignment;
pub use engine::{Allocation, WordAllocator};
pub use quota::{Quota, plan_counts};
