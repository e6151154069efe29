//! Simulate command
//!
//! Plays many seeded rounds with an automatic player and aggregates the outcomes.

use crate::board::BoardModel;
use crate::config::GameConfig;
use crate::core::{CategoryId, TileId};
use crate::game::{CategorySource, Dealer, Game, GameStatus, InputEvent};
use crate::repository::{CategoryRepository, LevelError};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on moves in one automatic round
const MAX_MOVES: usize = 10_000;

/// What to simulate
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub games: usize,
    pub source: CategorySource,
    /// Chance per move of deliberately dragging across two categories
    pub mistake_rate: f64,
    /// Round `i` is dealt with seed `seed + i`
    pub seed: u64,
}

/// Outcome of one automatic round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub seed: u64,
    pub status: GameStatus,
    pub tiles: usize,
    pub merges: u32,
    pub penalties: u32,
    pub lives_left: u32,
    /// Round ended with no merge available and the board unsolved
    pub stalled: bool,
}

/// Aggregated simulation results
#[derive(Debug)]
pub struct SimulationStatistics {
    pub total_games: usize,
    pub won: usize,
    pub lost: usize,
    pub stalled: usize,
    pub empty: usize,
    pub average_tiles: f64,
    pub average_merges: f64,
    pub average_penalties: f64,
    pub lives_distribution: FxHashMap<u32, usize>,
    pub starting_lives: u32,
    pub total_time: Duration,
}

/// Play rounds in parallel and collect statistics
///
/// # Errors
/// Returns [`LevelError`] if the settings name a level that does not exist.
pub fn run_simulation(
    repository: &CategoryRepository,
    config: &GameConfig,
    settings: &SimulationSettings,
) -> Result<SimulationStatistics, LevelError> {
    Dealer::new(repository, settings.source.clone(), Some(settings.seed))?;

    println!("🎲 Simulating {} rounds ({})...", settings.games, settings.source);

    let pb = ProgressBar::new(settings.games as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let records = (0..settings.games)
        .into_par_iter()
        .map(|i| {
            let seed = settings.seed.wrapping_add(i as u64);
            let record = play_round(repository, config, settings, seed);
            pb.inc(1);
            record
        })
        .collect::<Result<Vec<_>, _>>()?;
    pb.finish_with_message("Complete!");

    Ok(summarize(&records, config.starting_lives, start.elapsed()))
}

fn play_round(
    repository: &CategoryRepository,
    config: &GameConfig,
    settings: &SimulationSettings,
    seed: u64,
) -> Result<GameRecord, LevelError> {
    let mut dealer = Dealer::new(repository, settings.source.clone(), Some(seed))?;
    let mut game = Game::new(config.clone());
    dealer.deal(&mut game);

    let tiles = game.board().tile_count();
    let mut rng = StdRng::seed_from_u64(seed.rotate_left(32));
    let stalled = autoplay(&mut game, settings.mistake_rate, &mut rng);

    Ok(GameRecord {
        seed,
        status: game.status(),
        tiles,
        merges: game.stats().merges,
        penalties: game.stats().penalties,
        lives_left: game.lives().remaining(),
        stalled,
    })
}

/// Play `game` until it is won, lost or stuck, returning whether it got stuck
///
/// Each move merges a random subset (at least two tiles) of a random category, or, with
/// probability `mistake_rate`, drags across two different categories.
pub fn autoplay<R: Rng + ?Sized>(game: &mut Game, mistake_rate: f64, rng: &mut R) -> bool {
    let mistake_rate = mistake_rate.clamp(0.0, 1.0);

    for _ in 0..MAX_MOVES {
        if game.status() != GameStatus::Playing {
            return false;
        }
        if game.is_resolving() {
            let flash = game.config().penalty_flash();
            game.advance(flash);
            continue;
        }

        let groups = active_groups(game.board());
        if groups.len() >= 2 && rng.random_bool(mistake_rate) {
            let a = rng.random_range(0..groups.len());
            let mut b = rng.random_range(0..groups.len() - 1);
            if b >= a {
                b += 1;
            }
            drag(game, &[groups[a].1[0], groups[b].1[0]]);
            continue;
        }

        let mergeable: Vec<&(CategoryId, Vec<TileId>)> =
            groups.iter().filter(|(_, tiles)| tiles.len() >= 2).collect();
        let Some((category, tiles)) = mergeable.choose(rng) else {
            debug!("No merge available, stopping");
            return true;
        };
        let k = rng.random_range(2..=tiles.len());
        let picks: Vec<TileId> = tiles.choose_multiple(rng, k).copied().collect();
        debug!(%category, tiles = picks.len(), "Auto merge");
        drag(game, &picks);
    }

    game.status() == GameStatus::Playing
}

/// Active tiles grouped by category, in board order
fn active_groups(board: &BoardModel) -> Vec<(CategoryId, Vec<TileId>)> {
    let mut groups: Vec<(CategoryId, Vec<TileId>)> = Vec::new();
    let mut index: FxHashMap<CategoryId, usize> = FxHashMap::default();

    for tile in board.tiles_in_order().filter(|t| t.is_active()) {
        let slot = *index.entry(tile.category().clone()).or_insert_with(|| {
            groups.push((tile.category().clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(tile.id());
    }
    groups
}

fn drag(game: &mut Game, tiles: &[TileId]) {
    game.handle(InputEvent::Press(tiles[0]));
    for tile in &tiles[1..] {
        game.handle(InputEvent::Hover(*tile));
    }
    game.handle(InputEvent::Release);
}

fn summarize(
    records: &[GameRecord],
    starting_lives: u32,
    total_time: Duration,
) -> SimulationStatistics {
    let count = |status: GameStatus| records.iter().filter(|r| r.status == status).count();
    let average = |f: fn(&GameRecord) -> f64| {
        if records.is_empty() {
            0.0
        } else {
            records.iter().map(f).sum::<f64>() / records.len() as f64
        }
    };

    let mut lives_distribution: FxHashMap<u32, usize> = FxHashMap::default();
    for record in records.iter().filter(|r| r.status == GameStatus::Won) {
        *lives_distribution.entry(record.lives_left).or_insert(0) += 1;
    }

    SimulationStatistics {
        total_games: records.len(),
        won: count(GameStatus::Won),
        lost: count(GameStatus::Lost),
        stalled: records.iter().filter(|r| r.stalled).count(),
        empty: count(GameStatus::Empty),
        average_tiles: average(|r| r.tiles as f64),
        average_merges: average(|r| f64::from(r.merges)),
        average_penalties: average(|r| f64::from(r.penalties)),
        lives_distribution,
        starting_lives,
        total_time,
    }
}
