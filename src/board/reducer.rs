//! Post-merge cleanup and win detection

use super::{BoardModel, Retirement};
use crate::core::RowId;
use tracing::info;

/// What one cleanup pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleanup {
    /// Rows removed because merges emptied them
    pub pruned_rows: Vec<RowId>,
    pub retirement: Retirement,
    /// `true` only on the pass that first observed a solved board
    pub solved: bool,
}

/// Applies the cleanup rules after every successful merge
///
/// Order is fixed: empty rows are pruned, then fully merged categories are retired
/// (which may remove further rows), then the win condition is checked. The win is
/// reported at most once until [`BoardReducer::reset`].
#[derive(Debug, Clone, Default)]
pub struct BoardReducer {
    win_reported: bool,
}

impl BoardReducer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            win_reported: false,
        }
    }

    /// Run the full cleanup pass
    pub fn run(&mut self, board: &mut BoardModel) -> Cleanup {
        let pruned_rows = board.prune_empty_rows();
        let retirement = board.retire_singletons();
        let solved = self.check_win(board);
        Cleanup {
            pruned_rows,
            retirement,
            solved,
        }
    }

    /// Report a win the first time the board is observed solved
    pub fn check_win(&mut self, board: &BoardModel) -> bool {
        if self.win_reported || !board.is_solved() {
            return false;
        }
        self.win_reported = true;
        info!(
            rows = board.interactive_row_count(),
            retired = board.retired_categories().len(),
            "Board solved"
        );
        true
    }

    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.win_reported
    }

    /// Forget a reported win (new round)
    pub fn reset(&mut self) {
        self.win_reported = false;
    }
}
