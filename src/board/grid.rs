//! Board grid: pieces on playable squares.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Add;

use crate::core::Side;

/// A checkers piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    RedMan,
    RedKing,
    BlackMan,
    BlackKing,
}

impl Piece {
    /// The plain man of a side; `None` for `Side::NoPlayer`.
    #[must_use]
    pub const fn man(side: Side) -> Option<Self> {
        match side {
            Side::Red => Some(Piece::RedMan),
            Side::Black => Some(Piece::BlackMan),
            Side::NoPlayer => None,
        }
    }

    /// Owning side.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Piece::RedMan | Piece::RedKing => Side::Red,
            Piece::BlackMan | Piece::BlackKing => Side::Black,
        }
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::RedKing | Piece::BlackKing)
    }

    /// The king of the same side.
    #[must_use]
    pub const fn crowned(self) -> Self {
        match self {
            Piece::RedMan | Piece::RedKing => Piece::RedKing,
            Piece::BlackMan | Piece::BlackKing => Piece::BlackKing,
        }
    }

    /// Diagonal unit steps this piece may travel along.
    ///
    /// Men only advance towards the opponent; kings use all four diagonals.
    #[must_use]
    pub fn directions(self) -> SmallVec<[Pos; 4]> {
        if self.is_king() {
            SmallVec::from_slice(&[Pos::new(1, 1), Pos::new(-1, 1), Pos::new(1, -1), Pos::new(-1, -1)])
        } else {
            let dy = self.side().forward();
            SmallVec::from_slice(&[Pos::new(1, dy), Pos::new(-1, dy)])
        }
    }
}

/// Board coordinate: `x` is the column, `y` the row.
///
/// Signed so that move arithmetic can step off the board and be rejected
/// by [`Board::contains`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset from `self` to `other`.
    #[must_use]
    pub const fn delta(self, other: Pos) -> Pos {
        Pos::new(other.x - self.x, other.y - self.y)
    }

    /// Scale an offset.
    #[must_use]
    pub const fn scaled(self, by: i32) -> Pos {
        Pos::new(self.x * by, self.y * by)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Square grid of cells, row-major.
///
/// Only playable squares (`x + y` odd) ever hold a piece. The standard
/// board fits inline without heap allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: SmallVec<[Option<Piece>; 64]>,
}

impl Board {
    /// Empty board with `size` rows and columns.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: SmallVec::from_elem(None, size * size),
        }
    }

    /// Starting layout: black men fill the low rows, red men the high rows,
    /// leaving two empty rows in the middle.
    ///
    /// ```
    /// use rust_checkers::board::Board;
    ///
    /// let board = Board::standard(8);
    /// assert_eq!(board.piece_count(), 24);
    /// ```
    #[must_use]
    pub fn standard(size: usize) -> Self {
        let mut board = Self::empty(size);
        let rows_per_side = size.saturating_sub(2) / 2;
        for y in 0..size {
            let side = if y < rows_per_side {
                Side::Black
            } else if y >= size - rows_per_side {
                Side::Red
            } else {
                continue;
            };
            for x in 0..size {
                let pos = Pos::new(x as i32, y as i32);
                if Self::is_playable(pos) {
                    board.set(pos, Piece::man(side));
                }
            }
        }
        board
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if `pos` lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        let n = self.size as i32;
        (0..n).contains(&pos.x) && (0..n).contains(&pos.y)
    }

    /// True for the dark squares pieces stand on.
    #[must_use]
    pub const fn is_playable(pos: Pos) -> bool {
        (pos.x + pos.y).rem_euclid(2) == 1
    }

    /// Piece at `pos`; `None` for empty or off-board squares.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Place or clear a piece. Off-board positions are ignored.
    pub fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = piece;
        }
    }

    /// Builder form of [`Board::set`].
    #[must_use]
    pub fn with(mut self, pos: Pos, piece: Piece) -> Self {
        self.set(pos, Some(piece));
        self
    }

    /// Row a man of `side` is crowned on.
    #[must_use]
    pub fn king_row(&self, side: Side) -> i32 {
        match side {
            Side::Black => self.size as i32 - 1,
            _ => 0,
        }
    }

    /// Iterate over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|p| (Pos::new((i % n) as i32, (i / n) as i32), p)))
    }

    /// Iterate over one side's pieces.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.side() == side)
    }

    /// Total pieces on the board.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.size + pos.x as usize)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self)
    }
}
