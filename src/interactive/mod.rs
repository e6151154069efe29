//! Interactive TUI interface
//!
//! Mouse-driven board: press on a tile, drag across others, release to merge.

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, Statistics, run_tui};
pub use rendering::{BoardLayout, board_layout};
