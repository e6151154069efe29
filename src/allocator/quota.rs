//! Per-category word quotas

/// Quota parameters for one allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub min_per_category: usize,
    pub max_per_category: usize,
    /// Target total number of words
    pub total: usize,
}

impl Quota {
    #[must_use]
    pub const fn new(min_per_category: usize, max_per_category: usize, total: usize) -> Self {
        Self {
            min_per_category,
            max_per_category,
            total,
        }
    }
}

/// Decide how many words each category contributes
///
/// `available[i]` is the word count of the i-th valid category. Every category starts
/// at `max(min, total / categories)` clamped to what it can supply; any shortfall
/// against `total` is then handed out one word per category per pass, in order, to
/// categories still below their cap. Distribution stops early when nobody can take
/// more, so the result may sum to less than `total`.
///
/// The minimum is honoured before the total: when `min × categories > total` the
/// counts sum to more than `total`.
///
/// # Panics
/// Panics if `quota.min_per_category > quota.max_per_category`.
///
/// # Examples
/// ```
/// use word_groups::allocator::{Quota, plan_counts};
///
/// // 3 categories, 11 words wanted: 3 each, then one extra for the first two
/// assert_eq!(plan_counts(&[10, 10, 10], &Quota::new(2, 8, 11)), vec![4, 4, 3]);
///
/// // Not enough supply: every category gives everything it has
/// assert_eq!(plan_counts(&[2, 3], &Quota::new(1, 8, 20)), vec![2, 3]);
/// ```
#[must_use]
pub fn plan_counts(available: &[usize], quota: &Quota) -> Vec<usize> {
    assert!(
        quota.min_per_category <= quota.max_per_category,
        "min_per_category ({}) must not exceed max_per_category ({})",
        quota.min_per_category,
        quota.max_per_category
    );

    if available.is_empty() {
        return Vec::new();
    }

    let base = quota
        .min_per_category
        .max(quota.total / available.len());
    let caps: Vec<usize> = available
        .iter()
        .map(|&n| n.min(quota.max_per_category))
        .collect();
    let mut counts: Vec<usize> = caps.iter().map(|&cap| base.min(cap)).collect();

    let mut remaining = quota.total.saturating_sub(counts.iter().sum());
    while remaining > 0 {
        let mut distributed = false;
        for (count, &cap) in counts.iter_mut().zip(&caps) {
            if remaining == 0 {
                break;
            }
            if *count < cap {
                *count += 1;
                remaining -= 1;
                distributed = true;
            }
        }
        if !distributed {
            break;
        }
    }

    counts
}
