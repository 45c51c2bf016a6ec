//! Textual board form.
//!
//! One character per cell, rows joined by `|`, row 0 first:
//!
//! | symbol | cell        |
//! |--------|-------------|
//! | `*`    | empty       |
//! | `r`    | red man     |
//! | `R`    | red king    |
//! | `b`    | black man   |
//! | `B`    | black king  |
//!
//! This is the persisted representation and round-trips exactly.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::grid::{Board, Piece, Pos};
use crate::core::config::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Row separator.
pub const ROW_SEPARATOR: char = '|';

/// Symbol of an empty cell.
pub const EMPTY_SYMBOL: char = '*';

/// Errors parsing board text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("board text is empty")]
    Empty,

    #[error("board has {size} rows, expected {min}..={max}")]
    Size { size: usize, min: usize, max: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("unknown cell symbol {symbol:?} at {pos}")]
    UnknownSymbol { symbol: char, pos: Pos },

    #[error("piece on unplayable square {pos}")]
    UnplayableSquare { pos: Pos },
}

impl Piece {
    /// Cell symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Piece::RedMan => 'r',
            Piece::RedKing => 'R',
            Piece::BlackMan => 'b',
            Piece::BlackKing => 'B',
        }
    }

    /// Parse a cell symbol: `Some(None)` is an empty cell, `None` is not a symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Option<Piece>> {
        match symbol {
            EMPTY_SYMBOL => Some(None),
            'r' => Some(Some(Piece::RedMan)),
            'R' => Some(Some(Piece::RedKing)),
            'b' => Some(Some(Piece::BlackMan)),
            'B' => Some(Some(Piece::BlackKing)),
            _ => None,
        }
    }
}

impl Board {
    /// Render the persisted text form.
    ///
    /// ```
    /// use rust_checkers::board::Board;
    ///
    /// assert_eq!(
    ///     Board::standard(8).to_notation(),
    ///     "*b*b*b*b|b*b*b*b*|*b*b*b*b|********|********|r*r*r*r*|*r*r*r*r|r*r*r*r*"
    /// );
    /// ```
    #[must_use]
    pub fn to_notation(&self) -> String {
        let n = self.size();
        let mut out = String::with_capacity(n * (n + 1));
        for y in 0..n {
            if y > 0 {
                out.push(ROW_SEPARATOR);
            }
            for x in 0..n {
                let cell = self.get(Pos::new(x as i32, y as i32));
                out.push(cell.map_or(EMPTY_SYMBOL, Piece::symbol));
            }
        }
        out
    }

    /// Parse the persisted text form.
    ///
    /// The board must be square, within the supported sizes, and pieces may
    /// only stand on playable squares. Row lengths are checked before the
    /// board is allocated.
    pub fn from_notation(text: &str) -> Result<Self, NotationError> {
        if text.is_empty() {
            return Err(NotationError::Empty);
        }
        let rows: Vec<&str> = text.split(ROW_SEPARATOR).collect();
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(NotationError::Size {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != size {
                return Err(NotationError::RowLength { row: y, expected: size, found });
            }
        }

        let mut board = Board::empty(size);
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                let cell = Piece::from_symbol(symbol)
                    .ok_or(NotationError::UnknownSymbol { symbol, pos })?;
                if cell.is_some() && !Board::is_playable(pos) {
                    return Err(NotationError::UnplayableSquare { pos });
                }
                board.set(pos, cell);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl FromStr for Board {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_notation(s)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_notation())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Board::from_notation(&text).map_err(D::Error::custom)
    }
}
