//! Tile and row records stored in the board arena

use crate::core::{CategoryId, RowId, TileId};

/// Whether a tile still takes part in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStatus {
    /// Can be selected and merged
    Active,
    /// Sole survivor of a fully merged category; shown disabled, never selectable
    Retired,
}

/// A tile on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub(super) id: TileId,
    pub(super) word: String,
    pub(super) label: String,
    pub(super) category: CategoryId,
    pub(super) weight: u32,
    pub(super) status: TileStatus,
    pub(super) row: RowId,
}

impl Tile {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// The word the tile was created with
    #[inline]
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Current display text: the word, or `"{weight}/{total}"` once merged
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub const fn category(&self) -> &CategoryId {
        &self.category
    }

    /// Number of base words absorbed into this tile (1 until merged)
    #[inline]
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> TileStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TileStatus::Active
    }

    #[inline]
    #[must_use]
    pub const fn row(&self) -> RowId {
        self.row
    }

    #[inline]
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        self.weight > 1
    }
}

/// An ordered row of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub(super) id: RowId,
    pub(super) tiles: Vec<TileId>,
}

impl Row {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> RowId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
