//! Core domain types for the word-group puzzle
//!
//! Categories, tile and row identifiers, and the colour tokens the board hands to
//! whatever draws it. Everything here is plain data with no I/O.

mod category;
mod ids;

pub use category::{Category, CategoryId};
pub use ids::{ColorToken, RowId, TileId};
