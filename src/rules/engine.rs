//! Rules engine trait for board games played on the ledger.
//!
//! Games implement `RulesEngine` to define their rules:
//! - The starting board and who moves first
//! - Whether a move is legal and what it does to the board
//! - When a side has run out of moves and lost

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{Board, Pos};
use crate::core::Side;

/// A single step submitted by a player: one slide or one jump.
///
/// Capture chains are submitted one jump at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    #[must_use]
    pub const fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    /// Convenience constructor from raw coordinates.
    #[must_use]
    pub const fn from_coords(from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Self {
        Self::new(Pos::new(from_x, from_y), Pos::new(to_x, to_y))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Result of applying a legal move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the move.
    pub board: Board,

    /// Square of the captured piece, if the move was a jump.
    pub captured: Option<Pos>,

    /// The moved piece must jump again before the turn passes.
    pub must_continue: bool,

    /// The moved man was crowned at the end of its move.
    pub promoted: bool,
}

/// Why a move was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// There is no side to move (the game has ended).
    #[error("no side is to move")]
    NoSideToMove,

    #[error("{pos} is outside the board")]
    OutOfBoard { pos: Pos },

    #[error("no piece at {pos}")]
    NoPiece { pos: Pos },

    /// The piece belongs to the side not on move.
    #[error("piece at {pos} belongs to {owner}, {turn} is to move")]
    WrongTurn { pos: Pos, owner: Side, turn: Side },

    #[error("destination {pos} is occupied")]
    Occupied { pos: Pos },

    #[error("destination {pos} is not a playable square")]
    Unplayable { pos: Pos },

    #[error("cannot move from {from} to {to} in that direction")]
    InvalidDirection { from: Pos, to: Pos },

    #[error("cannot move from {from} to {to}: not a single step or jump")]
    InvalidDistance { from: Pos, to: Pos },

    #[error("no opposing piece to capture at {pos}")]
    NothingToCapture { pos: Pos },

    /// A capture is available somewhere on the board and must be taken.
    #[error("capture is mandatory")]
    CaptureMandatory,

    /// A capture chain is in progress and another piece tried to move.
    #[error("piece at {expected} must continue capturing, not {found}")]
    WrongPieceContinuing { expected: Pos, found: Pos },

    /// A capture chain is in progress and the continuing piece tried to slide.
    #[error("piece at {pos} must continue with a capture")]
    ContinuationMustCapture { pos: Pos },
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_move` must be deterministic and must not touch its input board
/// - `pending_capture` is the square of a piece in the middle of a capture
///   chain; while set, only that piece may move and only by capturing
/// - `winner_after` is asked after every completed move
pub trait RulesEngine {
    /// Board edge length.
    fn board_size(&self) -> usize;

    /// Starting board. Deterministic.
    fn initial_board(&self) -> Board;

    /// Side that moves first.
    fn first_mover(&self) -> Side {
        Side::Black
    }

    /// Validate and apply one step for `turn`.
    fn apply_move(
        &self,
        board: &Board,
        turn: Side,
        mv: Move,
        pending_capture: Option<Pos>,
    ) -> Result<MoveOutcome, MoveError>;

    /// Every step `side` could legally submit.
    fn legal_moves(&self, board: &Board, side: Side, pending_capture: Option<Pos>) -> Vec<Move>;

    // === Convenience Methods ===

    /// True if `side` can slide or jump anywhere.
    fn has_any_legal_move(&self, board: &Board, side: Side) -> bool {
        !self.legal_moves(board, side, None).is_empty()
    }

    /// Winner once `next` is due to move: the opponent if `next` is stuck,
    /// otherwise `NoPlayer`.
    fn winner_after(&self, board: &Board, next: Side) -> Side {
        if next.is_player() && !self.has_any_legal_move(board, next) {
            next.opponent()
        } else {
            Side::NoPlayer
        }
    }
}
