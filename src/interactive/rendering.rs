//! TUI rendering with ratatui
//!
//! Draws the board as a grid of bordered tiles and reports where each tile landed so
//! mouse input can be hit-tested against the last frame.

use super::app::{App, MessageStyle};
use crate::board::BoardModel;
use crate::core::{ColorToken, TileId};
use crate::game::GameStatus;
use crate::output::formatters::lives_meter;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Height of one tile cell, borders included
const CELL_HEIGHT: u16 = 3;

/// Screen positions of the board and its tiles in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Board interior; leaving it counts as crossing the boundary
    pub area: Rect,
    pub cells: Vec<(Rect, TileId)>,
}

impl BoardLayout {
    /// Tile under the given terminal cell
    #[must_use]
    pub fn tile_at(&self, column: u16, row: u16) -> Option<TileId> {
        let position = Position::new(column, row);
        self.cells
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, id)| *id)
    }

    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }
}

/// Place every tile of `board` inside `area`, one line of cells per board row
#[must_use]
pub fn board_layout(area: Rect, board: &BoardModel) -> BoardLayout {
    let columns = u16::try_from(board.shape().row_capacity)
        .unwrap_or(u16::MAX)
        .max(1);
    let width = area.width / columns;
    let mut cells = Vec::new();

    for (r, row) in board.rows().iter().enumerate() {
        let y = area.y + (r as u16) * CELL_HEIGHT;
        if y + CELL_HEIGHT > area.y + area.height {
            break;
        }
        for (c, id) in row.tiles().iter().enumerate() {
            let x = area.x + (c as u16) * width;
            cells.push((Rect::new(x, y, width, CELL_HEIGHT), *id));
        }
    }

    BoardLayout { area, cells }
}

/// Main UI rendering function, returning the board layout that was drawn
pub fn ui(f: &mut Frame, app: &App) -> BoardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Board
            Constraint::Percentage(30), // Info
        ])
        .split(chunks[1]);

    let layout = render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_status(f, app, chunks[2]);

    layout
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!("🧩 WORD GROUPS - {}", app.dealer.source()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) -> BoardLayout {
    let (title, color) = match app.game.status() {
        GameStatus::Won => (" 🎉 SOLVED! | n: next level  r: replay ", Color::Green),
        GameStatus::Lost => (" 💀 GAME OVER | r: retry  q: quit ", Color::Red),
        GameStatus::Empty => (" No categories available ", Color::Red),
        GameStatus::Playing if app.game.is_resolving() => (" Wrong group! ", Color::Red),
        GameStatus::Playing => (" Drag across tiles of one category ", Color::White),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = board_layout(inner, app.game.board());
    for (rect, id) in &layout.cells {
        let Some(tile) = app.game.board().tile(*id) else {
            continue;
        };
        let mut style = Style::default().fg(token_color(app.game.color_of(tile)));
        if tile.is_active() {
            style = style.add_modifier(Modifier::BOLD);
        } else {
            style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
        }
        let cell = Paragraph::new(tile.label())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(style),
            );
        f.render_widget(cell, *rect);
    }

    layout
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Round info
            Constraint::Length(3), // Progress
            Constraint::Min(5),    // Messages
        ])
        .split(area);

    render_round_info(f, app, chunks[0]);
    render_progress(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_round_info(f: &mut Frame, app: &App, area: Rect) {
    let board = app.game.board();
    let content = vec![
        Line::from(vec![
            Span::raw("Lives:      "),
            Span::styled(
                lives_meter(app.game.lives()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Merges:     {}", app.game.stats().merges)),
        Line::from(format!("Categories: {}", board.active_categories().len())),
        Line::from(format!("Selected:   {}", app.game.session().tiles().len())),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Round ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let board = app.game.board();
    let solved = board.retired_categories().len();
    let total = solved + board.active_categories().len();
    let percent = if total == 0 {
        0
    } else {
        (solved * 100 / total) as u16
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Groups Found ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Yellow))
        .percent(percent)
        .label(format!("{solved}/{total}"));
    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .take(10)
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let stats_text = format!(
        "Rounds: {} | Won: {} | Lost: {}",
        app.stats.rounds, app.stats.won, app.stats.lost
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let help = Paragraph::new("q: Quit | r: Restart | n: Next level | Esc: Cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}

const fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Neutral => Color::White,
        ColorToken::Selected => Color::Green,
        ColorToken::Merged => Color::Yellow,
        ColorToken::Penalty => Color::Red,
    }
}
