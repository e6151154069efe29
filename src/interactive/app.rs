//! TUI application state and logic

use super::rendering::{self, BoardLayout};
use crate::config::GameConfig;
use crate::core::TileId;
use crate::game::{CategorySource, Dealer, Game, InputEvent, TileView};
use crate::repository::{CategoryRepository, LevelError};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// How long to wait for input before advancing the clock
const TICK: Duration = Duration::from_millis(50);

/// Application state
pub struct App<'a> {
    pub game: Game,
    pub dealer: Dealer<'a>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub layout: BoardLayout,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Statistics {
    pub rounds: usize,
    pub won: usize,
    pub lost: usize,
}

impl<'a> App<'a> {
    /// # Errors
    ///
    /// Returns [`LevelError`] if `source` names a level that does not exist.
    pub fn new(
        repository: &'a CategoryRepository,
        config: GameConfig,
        source: CategorySource,
        seed: Option<u64>,
    ) -> Result<Self, LevelError> {
        let mut app = Self {
            game: Game::new(config),
            dealer: Dealer::new(repository, source, seed)?,
            messages: Vec::new(),
            stats: Statistics::default(),
            layout: BoardLayout::default(),
            should_quit: false,
        };
        app.new_round();
        Ok(app)
    }

    /// Deal a fresh board for the current source
    pub fn new_round(&mut self) {
        self.dealer.deal(&mut self.game);
        self.stats.rounds += 1;
        self.messages.clear();
        self.add_message(
            &format!("{}: drag across tiles of one category", self.dealer.source()),
            MessageStyle::Info,
        );
        self.flush_events();
    }

    pub fn next_level(&mut self) {
        if !self.dealer.next_level() {
            self.add_message("That was the last level!", MessageStyle::Info);
            return;
        }
        self.new_round();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.new_round(),
            KeyCode::Char('n') => self.next_level(),
            KeyCode::Esc => {
                self.game.reset();
                self.flush_events();
            }
            _ => {}
        }
    }

    /// Translate a mouse event into game input using the last drawn layout
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        let input = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.layout.tile_at(column, row).map(InputEvent::Press)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.layout.contains(column, row) {
                    self.layout.tile_at(column, row).map(InputEvent::Hover)
                } else {
                    Some(InputEvent::BoundaryEnter)
                }
            }
            MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::Release),
            _ => None,
        };

        if let Some(input) = input {
            self.game.handle(input);
            self.flush_events();
        }
    }

    /// Advance timers by the real time that passed
    pub fn tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
        self.flush_events();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    fn flush_events(&mut self) {
        for event in self.game.drain_events() {
            event.apply(self);
        }
    }
}

impl TileView for App<'_> {
    fn merge_completed(&mut self, _survivor: TileId, label: &str) {
        self.add_message(&format!("✓ Merged: {label}"), MessageStyle::Success);
    }

    fn penalty_applied(&mut self, _tiles: &[TileId]) {
        self.add_message("✗ Those don't belong together!", MessageStyle::Error);
    }

    fn lives_changed(&mut self, remaining: u32) {
        if remaining < self.game.lives().starting() {
            self.add_message(&format!("Lives left: {remaining}"), MessageStyle::Error);
        }
    }

    fn board_solved(&mut self) {
        self.stats.won += 1;
        let stats = self.game.stats();
        self.add_message(
            &format!(
                "🎉 Solved in {} merges with {} mistakes!",
                stats.merges, stats.penalties
            ),
            MessageStyle::Success,
        );
        self.add_message("Press 'n' for next level or 'q' to quit.", MessageStyle::Info);
    }

    fn game_over(&mut self) {
        self.stats.lost += 1;
        self.add_message("💀 Game over! Press 'r' to retry.", MessageStyle::Error);
    }

    fn no_categories(&mut self) {
        self.add_message("No categories available.", MessageStyle::Error);
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let mut layout = BoardLayout::default();
        terminal.draw(|f| layout = rendering::ui(f, &app))?;
        app.layout = layout;

        if event::poll(TICK)? {
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn app(repository: &CategoryRepository) -> App<'_> {
        let config = GameConfig {
            shuffle_intensity: 0.0,
            ..GameConfig::default()
        };
        let mut app = App::new(repository, config, CategorySource::Level(1), Some(8)).unwrap();
        app.layout = rendering::board_layout(Rect::new(0, 0, 80, 40), app.game.board());
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Drag over the first `n` cells of the top row
    fn drag_top_row(app: &mut App, n: u16) {
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        for c in 1..n {
            app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), c * 20 + 1, 1));
        }
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
    }

    #[test]
    fn drag_within_a_category_merges() {
        let repository = CategoryRepository::embedded();
        let mut app = app(&repository);

        // Unshuffled: the first row holds words of the first category.
        drag_top_row(&mut app, 2);
        assert_eq!(app.game.stats().merges, 1);
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Success);
    }

    #[test]
    fn leaving_the_board_cancels_the_drag() {
        let repository = CategoryRepository::embedded();
        let mut app = app(&repository);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 21, 1));
        assert_eq!(app.game.session().tiles().len(), 2);

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 90, 1));
        assert!(app.game.session().tiles().is_empty());
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 90, 1));
        assert_eq!(app.game.stats().merges, 0);
    }

    #[test]
    fn keys_control_rounds() {
        let repository = CategoryRepository::embedded();
        let mut app = app(&repository);

        app.handle_key(key('r'));
        assert_eq!(app.stats.rounds, 2);

        app.handle_key(key('n'));
        assert_eq!(app.dealer.source(), &CategorySource::Level(2));
        assert_eq!(app.stats.rounds, 3);

        app.handle_key(key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn penalty_flash_clears_after_tick() {
        let repository = CategoryRepository::embedded();
        let mut app = app(&repository);
        let board = app.game.board();
        let first = board.tiles_in_order().next().unwrap().category().clone();
        let other = board
            .tiles_in_order()
            .position(|t| *t.category() != first)
            .unwrap();
        let other_cell = app.layout.cells[other].0;

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        app.handle_mouse(mouse(
            MouseEventKind::Drag(MouseButton::Left),
            other_cell.x + 1,
            other_cell.y + 1,
        ));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));

        assert_eq!(app.game.lives().remaining(), 2);
        assert!(app.game.is_resolving());
        app.tick(Duration::from_secs(2));
        assert!(!app.game.is_resolving());
        assert_eq!(app.game.status(), GameStatus::Playing);
    }
}
