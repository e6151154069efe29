//! Game orchestration
//!
//! [`Game`] owns one round: the board, the drag session, lives and pending visual timers.
//! Front-ends feed it [`InputEvent`]s and clock ticks, then drain [`GameEvent`]s to
//! update whatever they draw.

mod dealer;
mod events;
mod timer;

pub use dealer::{CategorySource, Dealer};
pub use events::{GameEvent, InputEvent, InputOutcome, TileView};
pub use timer::{TimerId, TimerQueue};

use crate::allocator::WordCategoryAssignment;
use crate::board::{BoardModel, BoardReducer, Cleanup, Tile};
use crate::config::GameConfig;
use crate::core::{CategoryId, ColorToken, TileId};
use crate::session::{Lives, Resolution, SelectionSession, SessionState};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Nothing dealt yet, or the deal produced no words
    #[default]
    Empty,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Counters for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub merges: u32,
    pub penalties: u32,
}

/// One round of the puzzle
///
/// # Examples
/// ```
/// use word_groups::allocator::WordCategoryAssignment;
/// use word_groups::config::GameConfig;
/// use word_groups::core::CategoryId;
/// use word_groups::game::{Game, GameEvent, GameStatus, InputEvent, InputOutcome};
///
/// let mut assignment = WordCategoryAssignment::new();
/// assignment.insert("Red", CategoryId::new("Colors"));
/// assignment.insert("Blue", CategoryId::new("Colors"));
///
/// let mut game = Game::new(GameConfig::default());
/// let tiles = game.start(&assignment);
///
/// game.handle(InputEvent::Press(tiles[0]));
/// game.handle(InputEvent::Hover(tiles[1]));
/// let outcome = game.handle(InputEvent::Release);
///
/// assert!(matches!(outcome, InputOutcome::Merged { ref label, .. } if label == "2/2"));
/// assert_eq!(game.status(), GameStatus::Won);
/// assert!(game.drain_events().contains(&GameEvent::BoardSolved));
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: BoardModel,
    reducer: BoardReducer,
    session: SelectionSession,
    lives: Lives,
    timers: TimerQueue<Vec<TileId>>,
    penalty_timer: Option<TimerId>,
    events: Vec<GameEvent>,
    status: GameStatus,
    stats: GameStats,
}

impl Game {
    /// Create a game with an empty board
    ///
    /// # Panics
    /// Panics if the config describes a zero-sized board; validate it first.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: BoardModel::new(config.board_shape()),
            lives: Lives::new(config.starting_lives),
            config,
            reducer: BoardReducer::new(),
            session: SelectionSession::new(),
            timers: TimerQueue::new(),
            penalty_timer: None,
            events: Vec::new(),
            status: GameStatus::Empty,
            stats: GameStats::default(),
        }
    }

    /// Start a fresh round from an assignment, returning the tiles in layout order
    ///
    /// Lives, stats, timers and the selection are all reset. An empty assignment leaves
    /// the game [`GameStatus::Empty`] and emits [`GameEvent::NoCategoriesAvailable`].
    pub fn start(&mut self, assignment: &WordCategoryAssignment) -> Vec<TileId> {
        self.timers.clear();
        self.penalty_timer = None;
        self.session.reset();
        self.reducer.reset();
        self.lives.reset();
        self.stats = GameStats::default();
        self.events.clear();

        if assignment.is_empty() {
            warn!("No categories available, nothing to play");
            self.board.populate(assignment);
            self.status = GameStatus::Empty;
            self.events.push(GameEvent::NoCategoriesAvailable);
            return Vec::new();
        }

        let population = self.board.populate(assignment);
        for id in &population.tiles {
            if let Some(tile) = self.board.tile(*id) {
                self.events.push(GameEvent::TileCreated {
                    tile: *id,
                    row: tile.row(),
                    label: tile.label().to_string(),
                    category: tile.category().clone(),
                });
            }
        }
        self.events.push(GameEvent::LivesChanged {
            remaining: self.lives.remaining(),
        });
        self.status = GameStatus::Playing;
        info!(
            tiles = population.tiles.len(),
            categories = self.board.active_categories().len(),
            lives = self.lives.remaining(),
            "Round started"
        );

        population.tiles
    }

    /// Feed one pointer event
    pub fn handle(&mut self, input: InputEvent) -> InputOutcome {
        match input {
            InputEvent::Press(tile) => self.press(tile),
            InputEvent::Hover(tile) => self.hover(tile),
            InputEvent::Release => self.release(),
            InputEvent::BoundaryEnter => self.abort(),
        }
    }

    /// Move the logical clock forward, firing due timers
    pub fn advance(&mut self, elapsed: Duration) {
        for (id, tiles) in self.timers.advance(elapsed) {
            if self.penalty_timer == Some(id) {
                self.penalty_timer = None;
                self.end_penalty(&tiles);
            }
        }
    }

    /// Cancel a pending penalty display or an in-progress drag
    pub fn reset(&mut self) {
        if let Some(id) = self.penalty_timer.take()
            && let Some(tiles) = self.timers.cancel(id)
        {
            self.end_penalty(&tiles);
            return;
        }
        if let Some(tiles) = self.session.abort() {
            self.revert_colors(&tiles);
            self.push_selection();
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn board(&self) -> &BoardModel {
        &self.board
    }

    #[must_use]
    pub const fn session(&self) -> &SelectionSession {
        &self.session
    }

    #[must_use]
    pub const fn lives(&self) -> Lives {
        self.lives
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn stats(&self) -> GameStats {
        self.stats
    }

    /// Whether a penalty is still showing
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.session.state() == SessionState::Resolving
    }

    /// Colour a tile should currently be drawn in
    #[must_use]
    pub fn color_of(&self, tile: &Tile) -> ColorToken {
        if self.session.contains(tile.id()) {
            match self.session.state() {
                SessionState::Active => return ColorToken::Selected,
                SessionState::Resolving => return ColorToken::Penalty,
                SessionState::Idle => {}
            }
        }
        resting_color(tile)
    }

    fn press(&mut self, id: TileId) -> InputOutcome {
        if self.status != GameStatus::Playing {
            return InputOutcome::Ignored;
        }
        let Some(category) = self.active_category(id) else {
            return InputOutcome::Ignored;
        };
        if !self.session.press(id, &category) {
            return InputOutcome::Ignored;
        }
        self.events.push(GameEvent::TileColorChanged {
            tile: id,
            color: ColorToken::Selected,
        });
        self.push_selection();
        InputOutcome::Selecting
    }

    fn hover(&mut self, id: TileId) -> InputOutcome {
        let Some(category) = self.active_category(id) else {
            return InputOutcome::Ignored;
        };
        if !self.session.hover(id, &category) {
            return InputOutcome::Ignored;
        }
        self.events.push(GameEvent::TileColorChanged {
            tile: id,
            color: ColorToken::Selected,
        });
        self.push_selection();
        InputOutcome::Selecting
    }

    fn abort(&mut self) -> InputOutcome {
        let Some(tiles) = self.session.abort() else {
            return InputOutcome::Ignored;
        };
        self.revert_colors(&tiles);
        self.push_selection();
        InputOutcome::Discarded
    }

    fn release(&mut self) -> InputOutcome {
        match self.session.release() {
            None => InputOutcome::Ignored,
            Some(Resolution::Discarded(tiles)) => {
                self.revert_colors(&tiles);
                self.push_selection();
                InputOutcome::Discarded
            }
            Some(Resolution::Merge(tiles)) => self.merge(&tiles),
            Some(Resolution::Penalty(tiles)) => self.penalize(tiles),
        }
    }

    fn merge(&mut self, tiles: &[TileId]) -> InputOutcome {
        let outcome = self.board.merge_tiles(tiles);
        self.stats.merges += 1;

        for tile in &outcome.destroyed {
            self.events.push(GameEvent::TileDestroyed { tile: *tile });
        }
        self.events.push(GameEvent::TileLabelChanged {
            tile: outcome.survivor,
            label: outcome.label.clone(),
        });
        self.events.push(GameEvent::TileColorChanged {
            tile: outcome.survivor,
            color: ColorToken::Merged,
        });
        self.events.push(GameEvent::MergeCompleted {
            survivor: outcome.survivor,
            label: outcome.label.clone(),
            category: outcome.category.clone(),
        });
        self.push_selection();

        let cleanup = self.reducer.run(&mut self.board);
        self.publish_cleanup(&cleanup);

        InputOutcome::Merged {
            survivor: outcome.survivor,
            label: outcome.label,
        }
    }

    fn penalize(&mut self, tiles: Vec<TileId>) -> InputOutcome {
        let remaining = self.lives.lose();
        self.stats.penalties += 1;
        debug!(tiles = tiles.len(), remaining, "Mixed selection penalized");

        for tile in &tiles {
            self.events.push(GameEvent::TileColorChanged {
                tile: *tile,
                color: ColorToken::Penalty,
            });
        }
        self.events.push(GameEvent::PenaltyApplied {
            tiles: tiles.clone(),
        });
        self.events.push(GameEvent::LivesChanged { remaining });

        if let Some(previous) = self.penalty_timer.take() {
            self.timers.cancel(previous);
        }
        self.penalty_timer = Some(self.timers.schedule(self.config.penalty_flash(), tiles));

        if self.lives.is_exhausted() {
            self.status = GameStatus::Lost;
            info!(
                merges = self.stats.merges,
                penalties = self.stats.penalties,
                "Game over"
            );
            self.events.push(GameEvent::GameOver);
        }

        InputOutcome::Penalized { lives: remaining }
    }

    fn end_penalty(&mut self, tiles: &[TileId]) {
        self.session.finish_penalty();
        self.revert_colors(tiles);
        self.push_selection();
    }

    fn publish_cleanup(&mut self, cleanup: &Cleanup) {
        for row in &cleanup.pruned_rows {
            self.events.push(GameEvent::RowRemoved { row: *row });
        }
        for tile in &cleanup.retirement.retired {
            self.events.push(GameEvent::TileDisabled { tile: *tile });
        }
        for tile in &cleanup.retirement.destroyed {
            self.events.push(GameEvent::TileDestroyed { tile: *tile });
        }
        for row in &cleanup.retirement.removed_rows {
            self.events.push(GameEvent::RowRemoved { row: *row });
        }
        if cleanup.solved {
            self.status = GameStatus::Won;
            info!(
                merges = self.stats.merges,
                penalties = self.stats.penalties,
                lives = self.lives.remaining(),
                "Board solved"
            );
            self.events.push(GameEvent::BoardSolved);
        }
    }

    /// Restore resting colours; tiles no longer on the board are skipped
    fn revert_colors(&mut self, tiles: &[TileId]) {
        for id in tiles {
            if let Some(tile) = self.board.tile(*id) {
                self.events.push(GameEvent::TileColorChanged {
                    tile: *id,
                    color: resting_color(tile),
                });
            }
        }
    }

    fn push_selection(&mut self) {
        self.events.push(GameEvent::SelectionChanged {
            tiles: self.session.tiles().to_vec(),
            mixed: self.session.is_mixed(),
        });
    }

    fn active_category(&self, id: TileId) -> Option<CategoryId> {
        self.board
            .tile(id)
            .filter(|t| t.is_active())
            .map(|t| t.category().clone())
    }
}

fn resting_color(tile: &Tile) -> ColorToken {
    if tile.is_merged() {
        ColorToken::Merged
    } else {
        ColorToken::Neutral
    }
}
