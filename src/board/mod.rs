//! Checkers board: pieces, coordinates and the persisted text form.
//!
//! The board is a plain value type. Legality of moves lives in `rules`.

mod grid;
mod notation;

pub use grid::{Board, Piece, Pos};
pub use notation::{NotationError, EMPTY_SYMBOL, ROW_SEPARATOR};
