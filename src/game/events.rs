//! Inputs accepted by the game and notifications it emits

use crate::core::{CategoryId, ColorToken, RowId, TileId};

/// Pointer input, tagged with the tile under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(TileId),
    Hover(TileId),
    Release,
    /// Pointer crossed the board boundary
    BoundaryEnter,
}

/// Immediate result of one [`InputEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Selection started or grew
    Selecting,
    Merged { survivor: TileId, label: String },
    /// Mixed selection cost a life
    Penalized { lives: u32 },
    /// Selection dropped without effect
    Discarded,
    /// Not applicable in the current state
    Ignored,
}

/// Notification for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TileCreated {
        tile: TileId,
        row: RowId,
        label: String,
        category: CategoryId,
    },
    TileLabelChanged {
        tile: TileId,
        label: String,
    },
    TileColorChanged {
        tile: TileId,
        color: ColorToken,
    },
    TileDestroyed {
        tile: TileId,
    },
    TileDisabled {
        tile: TileId,
    },
    RowRemoved {
        row: RowId,
    },
    SelectionChanged {
        tiles: Vec<TileId>,
        mixed: bool,
    },
    MergeCompleted {
        survivor: TileId,
        label: String,
        category: CategoryId,
    },
    PenaltyApplied {
        tiles: Vec<TileId>,
    },
    LivesChanged {
        remaining: u32,
    },
    BoardSolved,
    GameOver,
    NoCategoriesAvailable,
}

/// Receiver for [`GameEvent`]s; every hook defaults to doing nothing
pub trait TileView {
    fn render_tile(&mut self, _tile: TileId, _row: RowId, _label: &str) {}
    fn set_tile_label(&mut self, _tile: TileId, _label: &str) {}
    fn set_tile_color(&mut self, _tile: TileId, _color: ColorToken) {}
    fn destroy_tile(&mut self, _tile: TileId) {}
    fn disable_tile(&mut self, _tile: TileId) {}
    fn remove_row(&mut self, _row: RowId) {}
    fn selection_changed(&mut self, _tiles: &[TileId]) {}
    fn merge_completed(&mut self, _survivor: TileId, _label: &str) {}
    fn penalty_applied(&mut self, _tiles: &[TileId]) {}
    fn lives_changed(&mut self, _remaining: u32) {}
    fn board_solved(&mut self) {}
    fn game_over(&mut self) {}
    fn no_categories(&mut self) {}
}

impl GameEvent {
    /// Dispatch this event to the matching [`TileView`] hook
    pub fn apply<V: TileView + ?Sized>(&self, view: &mut V) {
        match self {
            Self::TileCreated {
                tile, row, label, ..
            } => view.render_tile(*tile, *row, label),
            Self::TileLabelChanged { tile, label } => view.set_tile_label(*tile, label),
            Self::TileColorChanged { tile, color } => view.set_tile_color(*tile, *color),
            Self::TileDestroyed { tile } => view.destroy_tile(*tile),
            Self::TileDisabled { tile } => view.disable_tile(*tile),
            Self::RowRemoved { row } => view.remove_row(*row),
            Self::SelectionChanged { tiles, .. } => view.selection_changed(tiles),
            Self::MergeCompleted {
                survivor, label, ..
            } => view.merge_completed(*survivor, label),
            Self::PenaltyApplied { tiles } => view.penalty_applied(tiles),
            Self::LivesChanged { remaining } => view.lives_changed(*remaining),
            Self::BoardSolved => view.board_solved(),
            Self::GameOver => view.game_over(),
            Self::NoCategoriesAvailable => view.no_categories(),
        }
    }
}
