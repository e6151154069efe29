//! Drag-selection state
//!
//! [`SelectionSession`] tracks one press → hover* → release gesture and decides whether it
//! resolves as a merge, a penalty, or nothing. [`Lives`] counts the penalties a player
//! can still afford.

mod lives;
mod selection;

pub use lives::Lives;
pub use selection::{Resolution, SelectionSession, SessionState};
