//! Selection session state machine

use crate::core::{CategoryId, TileId};

/// Phase of the current gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Pointer is down and tiles are being collected
    Active,
    /// A penalty is showing; no press is accepted until it is finished
    Resolving,
}

/// What a release decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Homogeneous selection of two or more tiles, in selection order
    Merge(Vec<TileId>),
    /// Selection spanned more than one category
    Penalty(Vec<TileId>),
    /// Fewer than two tiles; nothing happens
    Discarded(Vec<TileId>),
}

/// One drag gesture: the ordered tiles under the pointer since press
///
/// The anchor category is fixed by the pressed tile. Hovering a tile of any other
/// category marks the selection mixed, and that flag never clears within the gesture.
/// A tile is included at most once.
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    state: SessionState,
    tiles: Vec<TileId>,
    anchor: Option<CategoryId>,
    mixed: bool,
}

impl SelectionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Option<&CategoryId> {
        self.anchor.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn is_mixed(&self) -> bool {
        self.mixed
    }

    #[must_use]
    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    /// Start a gesture on `tile`; ignored unless idle
    pub fn press(&mut self, tile: TileId, category: &CategoryId) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        self.state = SessionState::Active;
        self.tiles.clear();
        self.tiles.push(tile);
        self.anchor = Some(category.clone());
        self.mixed = false;
        true
    }

    /// Add `tile` to the active selection; returns whether it was appended
    pub fn hover(&mut self, tile: TileId, category: &CategoryId) -> bool {
        if self.state != SessionState::Active || self.tiles.contains(&tile) {
            return false;
        }
        if self.anchor.as_ref() != Some(category) {
            self.mixed = true;
        }
        self.tiles.push(tile);
        true
    }

    /// End the gesture
    ///
    /// A merge or a discard returns the session to idle. A penalty leaves it
    /// [`SessionState::Resolving`], holding the offending tiles, until
    /// [`finish_penalty`](Self::finish_penalty) or [`reset`](Self::reset).
    pub fn release(&mut self) -> Option<Resolution> {
        if self.state != SessionState::Active {
            return None;
        }
        if self.tiles.len() < 2 {
            return Some(Resolution::Discarded(self.clear()));
        }
        if self.mixed {
            self.state = SessionState::Resolving;
            return Some(Resolution::Penalty(self.tiles.clone()));
        }
        Some(Resolution::Merge(self.clear()))
    }

    /// Pointer left the board: drop the selection without side effects
    pub fn abort(&mut self) -> Option<Vec<TileId>> {
        (self.state == SessionState::Active).then(|| self.clear())
    }

    /// Penalty display is over; returns the tiles that were flagged
    pub fn finish_penalty(&mut self) -> Option<Vec<TileId>> {
        (self.state == SessionState::Resolving).then(|| self.clear())
    }

    /// Drop the selection in any state
    pub fn reset(&mut self) {
        self.clear();
    }

    fn clear(&mut self) -> Vec<TileId> {
        self.state = SessionState::Idle;
        self.anchor = None;
        self.mixed = false;
        std::mem::take(&mut self.tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (TileId, TileId, TileId) {
        (TileId(0), TileId(1), TileId(2))
    }

    #[test]
    fn press_starts_selection() {
        let (a, _, _) = ids();
        let colors = CategoryId::new("Colors");
        let mut session = SelectionSession::new();

        assert!(session.press(a, &colors));
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.tiles(), &[a]);
        assert_eq!(session.anchor(), Some(&colors));
        assert!(!session.is_mixed());
    }

    #[test]
    fn second_press_is_ignored() {
        let (a, b, _) = ids();
        let colors = CategoryId::new("Colors");
        let mut session = SelectionSession::new();

        session.press(a, &colors);
        assert!(!session.press(b, &colors));
        assert_eq!(session.tiles(), &[a]);
    }

    #[test]
    fn hover_is_idempotent() {
        let (a, b, _) = ids();
        let colors = CategoryId::new("Colors");
        let mut session = SelectionSession::new();

        session.press(a, &colors);
        assert!(session.hover(b, &colors));
        assert!(!session.hover(b, &colors));
        assert!(!session.hover(a, &colors));
        assert_eq!(session.tiles(), &[a, b]);
    }

    #[test]
    fn hover_without_press_is_ignored() {
        let (a, _, _) = ids();
        let mut session = SelectionSession::new();
        assert!(!session.hover(a, &CategoryId::new("Colors")));
        assert!(session.tiles().is_empty());
    }

    #[test]
    fn homogeneous_release_merges() {
        let (a, b, c) = ids();
        let colors = CategoryId::new("Colors");
        let mut session = SelectionSession::new();

        session.press(a, &colors);
        session.hover(b, &colors);
        session.hover(c, &colors);
        assert_eq!(session.release(), Some(Resolution::Merge(vec![a, b, c])));
        assert!(session.is_idle());
        assert!(session.tiles().is_empty());
    }

    #[test]
    fn mixed_flag_is_sticky() {
        let (a, b, c) = ids();
        let colors = CategoryId::new("Colors");
        let fruits = CategoryId::new("Fruits");
        let mut session = SelectionSession::new();

        session.press(a, &colors);
        session.hover(b, &fruits);
        session.hover(c, &colors);
        assert!(session.is_mixed());
        assert_eq!(session.anchor(), Some(&colors));

        assert_eq!(session.release(), Some(Resolution::Penalty(vec![a, b, c])));
        assert_eq!(session.state(), SessionState::Resolving);
    }

    #[test]
    fn penalty_blocks_press_until_finished() {
        let (a, b, c) = ids();
        let colors = CategoryId::new("Colors");
        let fruits = CategoryId::new("Fruits");
        let mut session = SelectionSession::new();

        session.press(a, &colors);
        session.hover(b, &fruits);
        session.release();

        assert!(!session.press(c, &colors));
        assert_eq!(session.finish_penalty(), Some(vec![a, b]));
        assert!(session.is_idle());
        assert!(session.press(c, &colors));
    }

    #[test]
    fn single_tile_release_is_discarded() {
        let (a, _, _) = ids();
        let mut session = SelectionSession::new();

        session.press(a, &CategoryId::new("Colors"));
        assert_eq!(session.release(), Some(Resolution::Discarded(vec![a])));
        assert!(session.is_idle());
    }

    #[test]
    fn abort_discards_selection() {
        let (a, b, _) = ids();
        let colors = CategoryId::new("Colors");
        let mut session = SelectionSession::new();

        assert_eq!(session.abort(), None);
        session.press(a, &colors);
        session.hover(b, &colors);
        assert_eq!(session.abort(), Some(vec![a, b]));
        assert!(session.is_idle());
        assert_eq!(session.release(), None);
    }

    #[test]
    fn abort_does_not_cancel_penalty() {
        let (a, b, _) = ids();
        let mut session = SelectionSession::new();

        session.press(a, &CategoryId::new("Colors"));
        session.hover(b, &CategoryId::new("Fruits"));
        session.release();
        assert_eq!(session.abort(), None);
        assert_eq!(session.state(), SessionState::Resolving);

        session.reset();
        assert!(session.is_idle());
    }
}
