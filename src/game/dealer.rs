//! Round setup: which categories a round is dealt from

use super::Game;
use crate::allocator::{Allocation, WordAllocator};
use crate::config::GameConfig;
use crate::repository::{CategoryRepository, Level, LevelError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::info;

/// Where a round's words come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySource {
    /// One of the built-in levels (1-based)
    Level(usize),
    /// Explicit category names
    Custom(Vec<String>),
    /// Any words from any categories
    Random,
}

impl fmt::Display for CategorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(n) => write!(f, "Level {n}"),
            Self::Custom(names) => write!(f, "Custom ({} categories)", names.len()),
            Self::Random => write!(f, "Random words"),
        }
    }
}

/// Deals successive rounds into a [`Game`]
///
/// Owns the random generator so a seeded dealer replays the same sequence of rounds.
#[derive(Debug, Clone)]
pub struct Dealer<'a> {
    repository: &'a CategoryRepository,
    source: CategorySource,
    rng: StdRng,
}

impl<'a> Dealer<'a> {
    /// # Errors
    /// Returns [`LevelError`] if `source` names a level that does not exist.
    pub fn new(
        repository: &'a CategoryRepository,
        source: CategorySource,
        seed: Option<u64>,
    ) -> Result<Self, LevelError> {
        if let CategorySource::Level(n) = source {
            Level::require(n)?;
        }
        let rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
        Ok(Self {
            repository,
            source,
            rng,
        })
    }

    #[must_use]
    pub const fn source(&self) -> &CategorySource {
        &self.source
    }

    /// Allocate the next round's words without starting it
    pub fn allocate(&mut self, config: &GameConfig) -> Allocation {
        let allocator = WordAllocator::new(self.repository, config.shuffle_intensity);
        let quota = config.quota();
        match &self.source {
            CategorySource::Level(n) => {
                let categories = Level::get(*n).map_or(&[][..], |level| level.categories);
                allocator.allocate(categories, &quota, &mut self.rng)
            }
            CategorySource::Custom(names) => allocator.allocate(names, &quota, &mut self.rng),
            CategorySource::Random => {
                allocator.random_words(config.total_word_count, &mut self.rng)
            }
        }
    }

    /// Start a new round in `game`
    pub fn deal(&mut self, game: &mut Game) -> Allocation {
        info!(source = %self.source, "Dealing round");
        let allocation = self.allocate(game.config());
        game.start(&allocation.assignment);
        allocation
    }

    /// Move to the following level; false when there is none (or not playing levels)
    pub fn next_level(&mut self) -> bool {
        let CategorySource::Level(n) = self.source else {
            return false;
        };
        match Level::get(n).and_then(Level::next) {
            Some(next) => {
                self.source = CategorySource::Level(next.number);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    #[test]
    fn rejects_unknown_level() {
        let repository = CategoryRepository::embedded();
        let err = Dealer::new(&repository, CategorySource::Level(9), Some(1)).unwrap_err();
        assert_eq!(err.requested, 9);
    }

    #[test]
    fn level_round_uses_level_categories() {
        let repository = CategoryRepository::embedded();
        let mut dealer = Dealer::new(&repository, CategorySource::Level(1), Some(7)).unwrap();
        let mut game = Game::new(GameConfig::default());

        let allocation = dealer.deal(&mut game);
        let level = Level::get(1).unwrap();
        for (category, _) in &allocation.per_category {
            assert!(level.categories.contains(&category.as_str()));
        }
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.board().tile_count(), allocation.len());
    }

    #[test]
    fn seeded_dealers_agree() {
        let repository = CategoryRepository::embedded();
        let mut a = Dealer::new(&repository, CategorySource::Level(2), Some(99)).unwrap();
        let mut b = Dealer::new(&repository, CategorySource::Level(2), Some(99)).unwrap();
        let mut game = Game::new(GameConfig::default());

        assert_eq!(a.deal(&mut game).assignment, b.deal(&mut game).assignment);
    }

    #[test]
    fn next_level_stops_at_last() {
        let repository = CategoryRepository::embedded();
        let mut dealer = Dealer::new(&repository, CategorySource::Level(4), None).unwrap();

        assert!(dealer.next_level());
        assert_eq!(dealer.source(), &CategorySource::Level(5));
        assert!(!dealer.next_level());
        assert_eq!(dealer.source(), &CategorySource::Level(5));
    }

    #[test]
    fn custom_and_random_sources() {
        let repository = CategoryRepository::embedded();
        let mut game = Game::new(GameConfig::default());

        let custom = CategorySource::Custom(vec!["Colors".into(), "Nope".into()]);
        let mut dealer = Dealer::new(&repository, custom, Some(3)).unwrap();
        assert!(!dealer.next_level());
        let allocation = dealer.deal(&mut game);
        assert_eq!(allocation.dropped, vec!["Nope".to_string()]);

        let mut dealer = Dealer::new(&repository, CategorySource::Random, Some(3)).unwrap();
        let allocation = dealer.deal(&mut game);
        assert!(allocation.len() <= 40);
        assert!(!allocation.is_empty());
        assert_eq!(game.board().tile_count(), allocation.len());
        assert_eq!(CategorySource::Random.to_string(), "Random words");
    }
}
