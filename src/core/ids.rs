//! Stable identifiers for board entities
//!
//! Tiles and rows live in an arena owned by the board; callers only ever hold these ids.

use std::fmt;

/// Handle to a tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub(crate) u32);

impl TileId {
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// Handle to a row on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u32);

impl RowId {
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Visual state a tile should be drawn in
///
/// The engine decides *which* token applies; mapping tokens to real colours is the
/// renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// Default, unselected
    Neutral,
    /// Part of the in-progress drag selection
    Selected,
    /// Survivor of at least one merge
    Merged,
    /// Part of a rejected mixed selection (reverts after the flash timer)
    Penalty,
}
