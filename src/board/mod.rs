//! Board model
//!
//! The logical grid: an arena of tiles keyed by [`TileId`], laid out in rows of fixed
//! capacity, with per-category bookkeeping kept in step with every structural change.

mod reducer;
mod tile;

pub use reducer::{BoardReducer, Cleanup};
pub use tile::{Row, Tile, TileStatus};

use crate::allocator::WordCategoryAssignment;
use crate::core::{CategoryId, RowId, TileId};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Geometry and win threshold of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardShape {
    /// Tiles per row
    pub row_capacity: usize,
    /// Upper bound on rows created by `populate`
    pub max_rows: usize,
    /// Board counts as solved once interactive rows drop to this many or fewer
    pub win_row_threshold: usize,
}

impl Default for BoardShape {
    fn default() -> Self {
        Self {
            row_capacity: 4,
            max_rows: 10,
            win_row_threshold: 1,
        }
    }
}

/// Tiles created by [`BoardModel::populate`]
#[derive(Debug, Clone, Default)]
pub struct Population {
    /// New tiles in layout order
    pub tiles: Vec<TileId>,
    /// Words that did not fit in `max_rows × row_capacity` slots
    pub overflow: Vec<String>,
}

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub survivor: TileId,
    pub category: CategoryId,
    /// Combined weight now carried by the survivor
    pub weight: u32,
    /// Category size captured when the board was populated
    pub total: u32,
    pub label: String,
    /// Tiles removed from the board, in selection order
    pub destroyed: Vec<TileId>,
}

/// Result of [`BoardModel::retire_singletons`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retirement {
    /// Tiles switched to [`TileStatus::Retired`]
    pub retired: Vec<TileId>,
    /// Rows removed because no active tile was left in them
    pub removed_rows: Vec<RowId>,
    /// Tiles that went away with those rows
    pub destroyed: Vec<TileId>,
}

impl Retirement {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.retired.is_empty() && self.removed_rows.is_empty()
    }
}

/// The board of word tiles
#[derive(Debug, Clone, Default)]
pub struct BoardModel {
    shape: BoardShape,
    tiles: FxHashMap<TileId, Tile>,
    rows: Vec<Row>,
    category_totals: FxHashMap<CategoryId, u32>,
    category_counts: FxHashMap<CategoryId, u32>,
    retired: Vec<CategoryId>,
    next_tile: u32,
    next_row: u32,
}

impl BoardModel {
    /// Create an empty board
    ///
    /// # Panics
    /// Panics if `row_capacity` or `max_rows` is zero.
    #[must_use]
    pub fn new(shape: BoardShape) -> Self {
        assert!(shape.row_capacity > 0, "row_capacity must be positive");
        assert!(shape.max_rows > 0, "max_rows must be positive");
        Self {
            shape,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Lay out one tile per word, `row_capacity` per row, in assignment order
    ///
    /// Any previous content is discarded. Category totals used for merge labels are
    /// captured here and never recomputed.
    ///
    /// # Examples
    /// ```
    /// use word_groups::allocator::WordCategoryAssignment;
    /// use word_groups::board::{BoardModel, BoardShape};
    /// use word_groups::core::CategoryId;
    ///
    /// let mut assignment = WordCategoryAssignment::new();
    /// for word in ["Red", "Blue", "Green", "Yellow", "Pink"] {
    ///     assignment.insert(word, CategoryId::new("Colors"));
    /// }
    ///
    /// let mut board = BoardModel::new(BoardShape::default());
    /// let population = board.populate(&assignment);
    /// assert_eq!(population.tiles.len(), 5);
    /// assert_eq!(board.rows().len(), 2);
    /// assert_eq!(board.category_total("Colors"), 5);
    /// ```
    pub fn populate(&mut self, assignment: &WordCategoryAssignment) -> Population {
        self.tiles.clear();
        self.rows.clear();
        self.category_totals.clear();
        self.category_counts.clear();
        self.retired.clear();

        let capacity = self.shape.row_capacity;
        let slots = capacity * self.shape.max_rows;
        let mut population = Population::default();

        for (i, (word, category)) in assignment.iter().enumerate() {
            if i >= slots {
                population.overflow.push(word.to_string());
                continue;
            }
            if i % capacity == 0 {
                let row = RowId(self.next_row);
                self.next_row += 1;
                self.rows.push(Row {
                    id: row,
                    tiles: Vec::with_capacity(capacity),
                });
            }

            let id = TileId(self.next_tile);
            self.next_tile += 1;
            let Some(row) = self.rows.last_mut() else {
                unreachable!("a row is pushed before the first tile");
            };
            row.tiles.push(id);

            self.tiles.insert(
                id,
                Tile {
                    id,
                    word: word.to_string(),
                    label: word.to_string(),
                    category: category.clone(),
                    weight: 1,
                    status: TileStatus::Active,
                    row: row.id,
                },
            );
            *self.category_totals.entry(category.clone()).or_insert(0) += 1;
            *self.category_counts.entry(category.clone()).or_insert(0) += 1;
            population.tiles.push(id);
        }

        if !population.overflow.is_empty() {
            warn!(
                dropped = population.overflow.len(),
                slots, "Board is full, extra words were not placed"
            );
        }
        debug!(
            tiles = population.tiles.len(),
            rows = self.rows.len(),
            categories = self.category_totals.len(),
            "Board populated"
        );

        population
    }

    /// Merge same-category tiles into the last one
    ///
    /// Weights are summed onto the survivor, which is relabelled
    /// `"{weight}/{category_total}"`; every other tile is removed from the board.
    ///
    /// # Panics
    /// Panics if fewer than two tiles are given, a tile is repeated, unknown or
    /// retired, or the tiles span more than one category. All of these are caller bugs:
    /// the selection session only ever resolves homogeneous selections as merges.
    pub fn merge_tiles(&mut self, tiles: &[TileId]) -> MergeOutcome {
        assert!(
            tiles.len() >= 2,
            "merge needs at least two tiles, got {}",
            tiles.len()
        );

        let survivor = tiles[tiles.len() - 1];
        let category = self.expect_active(survivor).category.clone();
        let mut weight = 0;
        for (i, id) in tiles.iter().enumerate() {
            assert!(!tiles[..i].contains(id), "{id} appears twice in merge");
            let tile = self.expect_active(*id);
            assert!(
                tile.category == category,
                "cannot merge {} ({}) with {category} tiles",
                id,
                tile.category
            );
            weight += tile.weight;
        }

        let destroyed: Vec<TileId> = tiles[..tiles.len() - 1].to_vec();
        for id in &destroyed {
            self.destroy_tile(*id);
        }
        if let Some(count) = self.category_counts.get_mut(&category) {
            *count -= destroyed.len() as u32;
        }

        let total = self.category_total(category.as_str());
        let label = format!("{weight}/{total}");
        if let Some(tile) = self.tiles.get_mut(&survivor) {
            tile.weight = weight;
            tile.label.clone_from(&label);
        }

        debug!(%survivor, %category, weight, total, "Tiles merged");

        MergeOutcome {
            survivor,
            category,
            weight,
            total,
            label,
            destroyed,
        }
    }

    /// Retire every category reduced to a single active tile
    ///
    /// The tile is disabled, not destroyed. A row left without active tiles is removed
    /// together with its (retired) tiles.
    pub fn retire_singletons(&mut self) -> Retirement {
        let mut retirement = Retirement::default();

        let singles: Vec<TileId> = self
            .tiles_in_order()
            .filter(|t| t.is_active() && self.category_count(t.category.as_str()) == 1)
            .map(Tile::id)
            .collect();

        for id in singles {
            let Some(tile) = self.tiles.get_mut(&id) else {
                continue;
            };
            tile.status = TileStatus::Retired;
            let category = tile.category.clone();
            let row = tile.row;

            self.category_counts.remove(&category);
            debug!(%id, %category, "Category retired");
            self.retired.push(category);
            retirement.retired.push(id);

            if !self.row_has_active(row) {
                retirement.destroyed.extend(self.remove_row(row));
                retirement.removed_rows.push(row);
            }
        }

        retirement
    }

    /// Remove rows that have no tiles left, returning their ids
    pub fn prune_empty_rows(&mut self) -> Vec<RowId> {
        let removed: Vec<RowId> = self
            .rows
            .iter()
            .filter(|r| r.is_empty())
            .map(Row::id)
            .collect();
        self.rows.retain(|r| !r.is_empty());
        removed
    }

    /// Whether interactive rows are down to the win threshold
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.interactive_row_count() <= self.shape.win_row_threshold
    }

    /// Rows holding at least one active tile
    #[must_use]
    pub fn interactive_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.tiles.iter().any(|id| self.tiles[id].is_active()))
            .count()
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All tiles, row by row
    pub fn tiles_in_order(&self) -> impl Iterator<Item = &Tile> {
        self.rows
            .iter()
            .flat_map(|r| r.tiles.iter().map(|id| &self.tiles[id]))
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn active_tile_count(&self) -> usize {
        self.tiles.values().filter(|t| t.is_active()).count()
    }

    /// Live (active) tiles of a category
    #[must_use]
    pub fn category_count(&self, category: &str) -> u32 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Tiles the category had when the board was populated
    #[must_use]
    pub fn category_total(&self, category: &str) -> u32 {
        self.category_totals.get(category).copied().unwrap_or(0)
    }

    /// Categories still in play, in board order
    #[must_use]
    pub fn active_categories(&self) -> Vec<CategoryId> {
        let mut seen: Vec<CategoryId> = Vec::new();
        for tile in self.tiles_in_order().filter(|t| t.is_active()) {
            if !seen.contains(&tile.category) {
                seen.push(tile.category.clone());
            }
        }
        seen
    }

    /// Categories retired so far, in retirement order
    #[must_use]
    pub fn retired_categories(&self) -> &[CategoryId] {
        &self.retired
    }

    fn expect_active(&self, id: TileId) -> &Tile {
        let tile = self
            .tiles
            .get(&id)
            .unwrap_or_else(|| panic!("{id} is not on the board"));
        assert!(tile.is_active(), "{id} is retired");
        tile
    }

    fn row_has_active(&self, row: RowId) -> bool {
        self.rows
            .iter()
            .find(|r| r.id == row)
            .is_some_and(|r| r.tiles.iter().any(|id| self.tiles[id].is_active()))
    }

    fn destroy_tile(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.remove(&id)
            && let Some(row) = self.rows.iter_mut().find(|r| r.id == tile.row)
        {
            row.tiles.retain(|t| *t != id);
        }
    }

    fn remove_row(&mut self, row: RowId) -> Vec<TileId> {
        let Some(index) = self.rows.iter().position(|r| r.id == row) else {
            return Vec::new();
        };
        let removed = self.rows.remove(index);
        for id in &removed.tiles {
            self.tiles.remove(id);
        }
        removed.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(pairs: &[(&str, &str)]) -> WordCategoryAssignment {
        pairs
            .iter()
            .map(|&(w, c)| (w.to_string(), CategoryId::new(c)))
            .collect()
    }

    fn board(pairs: &[(&str, &str)]) -> (BoardModel, Vec<TileId>) {
        let mut board = BoardModel::new(BoardShape::default());
        let population = board.populate(&assignment(pairs));
        (board, population.tiles)
    }

    #[test]
    fn populate_fills_rows_in_order() {
        let (board, tiles) = board(&[
            ("Red", "Colors"),
            ("Apple", "Fruits"),
            ("Blue", "Colors"),
            ("Pear", "Fruits"),
            ("Green", "Colors"),
            ("Plum", "Fruits"),
        ]);

        assert_eq!(board.rows().len(), 2);
        assert_eq!(board.rows()[0].tiles(), &tiles[..4]);
        assert_eq!(board.rows()[1].tiles(), &tiles[4..]);
        assert_eq!(board.category_count("Colors"), 3);
        assert_eq!(board.category_total("Fruits"), 3);

        let first = board.tile(tiles[0]).unwrap();
        assert_eq!(first.label(), "Red");
        assert_eq!(first.weight(), 1);
        assert!(first.is_active());
        assert_eq!(first.row(), board.rows()[0].id());
    }

    #[test]
    fn populate_overflow_is_reported() {
        let shape = BoardShape {
            row_capacity: 2,
            max_rows: 2,
            win_row_threshold: 1,
        };
        let mut board = BoardModel::new(shape);
        let population = board.populate(&assignment(&[
            ("a", "X"),
            ("b", "X"),
            ("c", "X"),
            ("d", "X"),
            ("e", "X"),
        ]));

        assert_eq!(population.tiles.len(), 4);
        assert_eq!(population.overflow, vec!["e"]);
        assert_eq!(board.category_total("X"), 4);
    }

    #[test]
    fn populate_replaces_previous_board() {
        let (mut board, _) = board(&[("Red", "Colors"), ("Blue", "Colors")]);
        board.populate(&assignment(&[("Mars", "Planets")]));

        assert_eq!(board.tile_count(), 1);
        assert_eq!(board.category_count("Colors"), 0);
        assert_eq!(board.category_total("Planets"), 1);
    }

    #[test]
    fn merge_two_tiles() {
        let (mut board, tiles) = board(&[("Red", "Colors"), ("Blue", "Colors")]);
        let outcome = board.merge_tiles(&[tiles[0], tiles[1]]);

        assert_eq!(outcome.survivor, tiles[1]);
        assert_eq!(outcome.label, "2/2");
        assert_eq!(outcome.destroyed, vec![tiles[0]]);
        assert!(board.tile(tiles[0]).is_none());
        assert_eq!(board.tile(tiles[1]).unwrap().label(), "2/2");
        assert_eq!(board.category_count("Colors"), 1);
        assert_eq!(board.rows()[0].tiles(), &[tiles[1]]);
    }

    #[test]
    fn merges_accumulate_to_full_category() {
        let (mut board, t) = board(&[
            ("a", "A"),
            ("b", "A"),
            ("x", "B"),
            ("c", "A"),
            ("d", "A"),
            ("y", "B"),
            ("e", "A"),
        ]);

        assert_eq!(board.merge_tiles(&[t[0], t[1]]).label, "2/5");
        assert_eq!(board.merge_tiles(&[t[3], t[4]]).label, "2/5");
        let last = board.merge_tiles(&[t[1], t[4], t[6]]);
        assert_eq!(last.label, "5/5");
        assert_eq!(last.weight, 5);
        assert_eq!(board.category_count("A"), 1);

        let retirement = board.retire_singletons();
        assert_eq!(retirement.retired, vec![t[6]]);
        assert_eq!(board.tile(t[6]).unwrap().status(), TileStatus::Retired);
        assert_eq!(board.category_count("A"), 0);
        assert_eq!(board.retired_categories(), &[CategoryId::new("A")]);
    }

    #[test]
    #[should_panic(expected = "at least two tiles")]
    fn merge_single_tile_panics() {
        let (mut board, tiles) = board(&[("Red", "Colors")]);
        board.merge_tiles(&tiles);
    }

    #[test]
    #[should_panic(expected = "cannot merge")]
    fn merge_mixed_categories_panics() {
        let (mut board, tiles) = board(&[("Red", "Colors"), ("Apple", "Fruits")]);
        board.merge_tiles(&tiles);
    }

    #[test]
    #[should_panic(expected = "appears twice")]
    fn merge_repeated_tile_panics() {
        let (mut board, tiles) = board(&[("Red", "Colors"), ("Blue", "Colors")]);
        board.merge_tiles(&[tiles[0], tiles[0]]);
    }

    #[test]
    #[should_panic(expected = "is retired")]
    fn merge_retired_tile_panics() {
        let (mut board, tiles) = board(&[("Red", "Colors"), ("Apple", "Fruits"), ("Pear", "Fruits")]);
        board.retire_singletons();
        board.merge_tiles(&[tiles[1], tiles[0]]);
    }

    #[test]
    fn retire_keeps_row_with_active_tiles() {
        let (mut board, tiles) = board(&[("Red", "Colors"), ("Apple", "Fruits"), ("Pear", "Fruits")]);
        let retirement = board.retire_singletons();

        assert_eq!(retirement.retired, vec![tiles[0]]);
        assert!(retirement.removed_rows.is_empty());
        assert_eq!(board.tile(tiles[0]).unwrap().status(), TileStatus::Retired);
        assert_eq!(board.active_categories(), vec![CategoryId::new("Fruits")]);
    }

    #[test]
    fn retire_removes_row_without_active_tiles() {
        let (mut board, tiles) = board(&[
            ("Red", "Colors"),
            ("Blue", "Colors"),
            ("Apple", "Fruits"),
            ("Pear", "Fruits"),
            ("Mars", "Planets"),
        ]);
        let second_row = board.rows()[1].id();

        let retirement = board.retire_singletons();
        assert_eq!(retirement.retired, vec![tiles[4]]);
        assert_eq!(retirement.removed_rows, vec![second_row]);
        assert_eq!(retirement.destroyed, vec![tiles[4]]);
        assert!(board.tile(tiles[4]).is_none());
        assert_eq!(board.rows().len(), 1);
    }

    #[test]
    fn retire_is_idempotent() {
        let (mut board, _) = board(&[("Red", "Colors"), ("Apple", "Fruits"), ("Pear", "Fruits")]);
        assert!(!board.retire_singletons().is_empty());
        assert!(board.retire_singletons().is_empty());
    }

    #[test]
    fn prune_removes_rows_emptied_by_merges() {
        let (mut board, t) = board(&[
            ("a", "A"),
            ("b", "A"),
            ("c", "A"),
            ("d", "A"),
            ("e", "A"),
        ]);
        let first_row = board.rows()[0].id();

        board.merge_tiles(&[t[0], t[1], t[2], t[3], t[4]]);
        assert!(board.rows()[0].is_empty());

        assert_eq!(board.prune_empty_rows(), vec![first_row]);
        assert_eq!(board.rows().len(), 1);
        assert!(board.prune_empty_rows().is_empty());
    }

    #[test]
    fn solved_when_one_interactive_row_left() {
        let (mut board, t) = board(&[
            ("a", "A"),
            ("b", "A"),
            ("c", "A"),
            ("d", "A"),
            ("x", "B"),
            ("y", "B"),
        ]);
        assert_eq!(board.interactive_row_count(), 2);
        assert!(!board.is_solved());

        board.merge_tiles(&[t[4], t[5]]);
        board.retire_singletons();
        assert_eq!(board.interactive_row_count(), 1);
        assert!(board.is_solved());
    }

    #[test]
    fn tiles_in_order_follows_rows() {
        let (board, tiles) = board(&[("a", "A"), ("b", "B"), ("c", "A"), ("d", "B"), ("e", "A")]);
        let order: Vec<TileId> = board.tiles_in_order().map(Tile::id).collect();
        assert_eq!(order, tiles);
    }

    #[test]
    #[should_panic(expected = "row_capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = BoardModel::new(BoardShape {
            row_capacity: 0,
            max_rows: 10,
            win_row_threshold: 1,
        });
    }
}
