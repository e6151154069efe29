//! Allocation engine

use super::assignment::WordCategoryAssignment;
use super::quota::{Quota, plan_counts};
use crate::core::{Category, CategoryId};
use crate::repository::CategoryRepository;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Outcome of one allocation
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// Selected words, in final (shuffled) order
    pub assignment: WordCategoryAssignment,
    /// How many words each valid category contributed, in request order
    pub per_category: Vec<(CategoryId, usize)>,
    /// Requested names that were missing, empty or repeated
    pub dropped: Vec<String>,
    /// Number of pairwise swaps performed by the global shuffle
    pub swaps: usize,
}

impl Allocation {
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

/// Selects balanced word subsets from a repository
///
/// # Examples
/// ```
/// use word_groups::allocator::{Quota, WordAllocator};
/// use word_groups::core::Category;
/// use word_groups::repository::CategoryRepository;
///
/// let repository = CategoryRepository::from_categories([
///     Category::new("Colors", ["Red", "Blue", "Green", "Yellow"]),
/// ]);
/// let allocator = WordAllocator::new(&repository, 1.0);
///
/// let allocation = allocator.allocate_seeded(&["Colors"], &Quota::new(2, 3, 3), 7);
/// assert_eq!(allocation.len(), 3);
/// assert!(allocation.assignment.iter().all(|(_, c)| c.as_str() == "Colors"));
/// ```
pub struct WordAllocator<'a> {
    repository: &'a CategoryRepository,
    shuffle_intensity: f64,
}

impl<'a> WordAllocator<'a> {
    /// Create an allocator
    ///
    /// `shuffle_intensity` is clamped to `[0, 1]`; NaN is treated as 0.
    #[must_use]
    pub fn new(repository: &'a CategoryRepository, shuffle_intensity: f64) -> Self {
        let shuffle_intensity = if shuffle_intensity.is_nan() {
            0.0
        } else {
            shuffle_intensity.clamp(0.0, 1.0)
        };
        Self {
            repository,
            shuffle_intensity,
        }
    }

    #[must_use]
    pub const fn shuffle_intensity(&self) -> f64 {
        self.shuffle_intensity
    }

    /// Allocate with a fresh generator seeded from `seed`
    ///
    /// # Panics
    /// Panics if `quota.min_per_category > quota.max_per_category`.
    #[must_use]
    pub fn allocate_seeded<S: AsRef<str>>(
        &self,
        categories: &[S],
        quota: &Quota,
        seed: u64,
    ) -> Allocation {
        let mut rng = StdRng::seed_from_u64(seed);
        self.allocate(categories, quota, &mut rng)
    }

    /// Select words from the requested categories
    ///
    /// Categories that are unknown, empty, or requested twice are dropped with a
    /// warning. With no valid category left the allocation is empty.
    ///
    /// # Panics
    /// Panics if `quota.min_per_category > quota.max_per_category`.
    pub fn allocate<S, R>(&self, categories: &[S], quota: &Quota, rng: &mut R) -> Allocation
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut allocation = Allocation::default();
        let valid = self.valid_categories(categories, &mut allocation.dropped);

        if valid.is_empty() {
            warn!("No valid categories available");
            return allocation;
        }

        let available: Vec<usize> = valid.iter().map(|c| c.len()).collect();
        let counts = plan_counts(&available, quota);
        debug!(?counts, total = quota.total, "Planned category quotas");

        let mut selected: Vec<(String, CategoryId)> = Vec::with_capacity(counts.iter().sum());
        for (category, &count) in valid.iter().zip(&counts) {
            let mut words: Vec<&String> = category.words().iter().collect();
            words.shuffle(rng);
            selected.extend(
                words
                    .into_iter()
                    .take(count)
                    .map(|w| (w.clone(), category.id().clone())),
            );
            allocation.per_category.push((category.id().clone(), count));
        }

        allocation.swaps = scramble(&mut selected, self.shuffle_intensity, rng);

        for (word, category) in selected {
            if let Some(previous) = allocation.assignment.insert(word.clone(), category.clone()) {
                warn!(
                    word = %word,
                    previous = %previous,
                    category = %category,
                    "Word appears in two categories, keeping the later one"
                );
            }
        }

        allocation
    }

    /// Fill up to `total` words from categories taken in random order
    ///
    /// Categories are visited in a uniformly shuffled order and each contributes as
    /// many shuffled words as still fit. With `shuffle_intensity == 0` nothing is
    /// shuffled and categories are taken in repository order.
    pub fn random_words<R: Rng + ?Sized>(&self, total: usize, rng: &mut R) -> Allocation {
        let mut allocation = Allocation::default();
        let shuffle = self.shuffle_intensity > 0.0;

        let mut order: Vec<&Category> = self.repository.categories().iter().collect();
        if shuffle {
            order.shuffle(rng);
        }

        for category in order {
            if allocation.assignment.len() >= total {
                break;
            }
            let remaining = total - allocation.assignment.len();

            let mut words: Vec<&String> = category.words().iter().collect();
            if shuffle {
                words.shuffle(rng);
            }

            let taken = remaining.min(words.len());
            for word in words.into_iter().take(taken) {
                allocation
                    .assignment
                    .insert(word.clone(), category.id().clone());
            }
            allocation.per_category.push((category.id().clone(), taken));
        }

        allocation
    }

    fn valid_categories<S: AsRef<str>>(
        &self,
        requested: &[S],
        dropped: &mut Vec<String>,
    ) -> Vec<&'a Category> {
        let mut valid: Vec<&'a Category> = Vec::with_capacity(requested.len());

        for name in requested {
            let name = name.as_ref();
            match self.repository.get(name) {
                Some(category) if valid.iter().any(|c| c.id() == category.id()) => {
                    warn!(category = name, "Category requested twice, ignoring repeat");
                    dropped.push(name.to_string());
                }
                Some(category) if !category.is_empty() => valid.push(category),
                _ => {
                    warn!(category = name, "Category is empty or not found");
                    dropped.push(name.to_string());
                }
            }
        }

        valid
    }
}

/// Perform `ceil(intensity × len)` random pairwise swaps, returning how many were done
///
/// Intensity 0 leaves the order untouched.
pub(crate) fn scramble<T, R: Rng + ?Sized>(items: &mut [T], intensity: f64, rng: &mut R) -> usize {
    if items.is_empty() {
        return 0;
    }

    let swaps = (intensity * items.len() as f64).ceil() as usize;
    for _ in 0..swaps {
        let a = rng.random_range(0..items.len());
        let b = rng.random_range(0..items.len());
        items.swap(a, b);
    }
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> CategoryRepository {
        CategoryRepository::from_categories([
            Category::new("Colors", ["Red", "Blue", "Green", "Yellow"]),
            Category::new("Fruits", ["Apple", "Banana", "Mango", "Grape", "Cherry", "Peach"]),
            Category::new("Planets", ["Mercury", "Venus", "Earth", "Mars", "Jupiter"]),
            Category::new("Empty", Vec::<String>::new()),
        ])
    }

    #[test]
    fn spec_example_colors() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let allocation = allocator.allocate_seeded(&["Colors"], &Quota::new(2, 3, 3), 1);

        assert_eq!(allocation.len(), 3);
        for (word, category) in allocation.assignment.iter() {
            assert_eq!(category.as_str(), "Colors");
            assert!(["Red", "Blue", "Green", "Yellow"].contains(&word));
        }
    }

    #[test]
    fn missing_and_empty_categories_are_dropped() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 0.5);
        let allocation = allocator.allocate_seeded(
            &["Colors", "Empty", "Dinosaurs", "Fruits"],
            &Quota::new(1, 4, 8),
            3,
        );

        assert_eq!(allocation.dropped, vec!["Empty", "Dinosaurs"]);
        assert_eq!(allocation.assignment.count_for("Empty"), 0);
        assert_eq!(allocation.assignment.count_for("Dinosaurs"), 0);
        assert_eq!(allocation.len(), 8);
    }

    #[test]
    fn repeated_category_is_dropped() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let allocation =
            allocator.allocate_seeded(&["Planets", "Planets"], &Quota::new(1, 5, 10), 3);

        assert_eq!(allocation.dropped, vec!["Planets"]);
        assert_eq!(allocation.len(), 5);
    }

    #[test]
    fn no_valid_categories_gives_empty_allocation() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let allocation = allocator.allocate_seeded(&["Empty", "Nope"], &Quota::new(1, 4, 10), 3);

        assert!(allocation.is_empty());
        assert_eq!(allocation.swaps, 0);
        assert!(allocation.per_category.is_empty());
    }

    #[test]
    fn every_word_belongs_to_its_category() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);

        for seed in 0..50 {
            let allocation = allocator.allocate_seeded(
                &["Colors", "Fruits", "Planets"],
                &Quota::new(2, 4, 10),
                seed,
            );
            assert!(allocation.len() <= 10);
            for (word, category) in allocation.assignment.iter() {
                assert!(repository.get(category.as_str()).unwrap().contains(word));
            }
            for (category, count) in &allocation.per_category {
                let supply = repository.get(category.as_str()).unwrap().len();
                assert!(*count <= supply.min(4));
                assert_eq!(allocation.assignment.count_for(category.as_str()), *count);
            }
        }
    }

    #[test]
    fn short_supply_gives_short_assignment() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let allocation =
            allocator.allocate_seeded(&["Colors", "Planets"], &Quota::new(1, 10, 100), 9);

        assert_eq!(allocation.len(), 9);
    }

    #[test]
    fn zero_intensity_keeps_category_grouping() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 0.0);
        let allocation = allocator.allocate_seeded(
            &["Colors", "Fruits", "Planets"],
            &Quota::new(3, 3, 9),
            11,
        );

        assert_eq!(allocation.swaps, 0);
        let categories: Vec<&str> = allocation
            .assignment
            .iter()
            .map(|(_, c)| c.as_str())
            .collect();
        assert_eq!(
            categories,
            vec![
                "Colors", "Colors", "Colors", "Fruits", "Fruits", "Fruits", "Planets",
                "Planets", "Planets"
            ]
        );
    }

    #[test]
    fn full_intensity_swaps_once_per_word() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let allocation = allocator.allocate_seeded(
            &["Colors", "Fruits", "Planets"],
            &Quota::new(3, 3, 9),
            11,
        );

        assert_eq!(allocation.swaps, 9);
    }

    #[test]
    fn partial_intensity_rounds_swaps_up() {
        let mut items: Vec<u32> = (0..10).collect();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(scramble(&mut items, 0.25, &mut rng), 3);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn intensity_is_clamped() {
        let repository = repository();
        assert_eq!(WordAllocator::new(&repository, 3.0).shuffle_intensity(), 1.0);
        assert_eq!(WordAllocator::new(&repository, -1.0).shuffle_intensity(), 0.0);
        assert_eq!(WordAllocator::new(&repository, f64::NAN).shuffle_intensity(), 0.0);
    }

    #[test]
    fn same_seed_same_allocation() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let quota = Quota::new(2, 4, 10);
        let a = allocator.allocate_seeded(&["Colors", "Fruits", "Planets"], &quota, 42);
        let b = allocator.allocate_seeded(&["Colors", "Fruits", "Planets"], &quota, 42);
        assert_eq!(a.assignment, b.assignment);
    }

    #[test]
    fn per_category_shuffle_reaches_every_word() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 0.0);
        let mut seen = std::collections::HashSet::new();

        for seed in 0..200 {
            let allocation = allocator.allocate_seeded(&["Fruits"], &Quota::new(1, 1, 1), seed);
            seen.extend(allocation.assignment.iter().map(|(w, _)| w.to_string()));
        }

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn random_words_respects_total() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let mut rng = StdRng::seed_from_u64(8);
        let allocation = allocator.random_words(7, &mut rng);

        assert_eq!(allocation.len(), 7);
        assert_eq!(allocation.assignment.count_for("Empty"), 0);
    }

    #[test]
    fn random_words_without_shuffle_is_repository_order() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 0.0);
        let mut rng = StdRng::seed_from_u64(8);
        let allocation = allocator.random_words(6, &mut rng);

        let words: Vec<&str> = allocation.assignment.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["Red", "Blue", "Green", "Yellow", "Apple", "Banana"]);
    }

    #[test]
    fn random_words_more_than_supply() {
        let repository = repository();
        let allocator = WordAllocator::new(&repository, 1.0);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(allocator.random_words(500, &mut rng).len(), 15);
    }
}
