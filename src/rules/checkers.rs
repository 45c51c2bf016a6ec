//! English draughts on an N x N board.
//!
//! ## Rules
//!
//! - Men step one square diagonally forward; kings step in any diagonal
//! - A jump leaps over one adjacent opposing piece onto the empty square
//!   beyond it and removes that piece
//! - If any piece of the side to move can jump, that side must jump
//!   (checked over the whole board, not just the moved piece)
//! - After a jump, if the same piece can jump again it must do so before the
//!   turn passes; no other piece may move in between
//! - A man reaching the far row is crowned once its move sequence ends
//! - A side with no legal move loses

use smallvec::SmallVec;

use super::engine::{Move, MoveError, MoveOutcome, RulesEngine};
use crate::board::{Board, Piece, Pos};
use crate::core::Side;

/// Checkers rules for a given board size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkers {
    size: usize,
}

impl Default for Checkers {
    fn default() -> Self {
        Self::standard()
    }
}

impl Checkers {
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// 8x8 board.
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(8)
    }

    /// True if any piece of `side` has a jump available.
    #[must_use]
    pub fn can_capture(&self, board: &Board, side: Side) -> bool {
        board
            .pieces_of(side)
            .any(|(pos, piece)| !Self::jumps_from(board, pos, piece).is_empty())
    }

    fn jumps_from(board: &Board, from: Pos, piece: Piece) -> SmallVec<[Move; 4]> {
        piece
            .directions()
            .into_iter()
            .filter(|&dir| {
                let over = from + dir;
                let land = from + dir.scaled(2);
                board.contains(land)
                    && board.get(land).is_none()
                    && board.get(over).is_some_and(|p| p.side() != piece.side())
            })
            .map(|dir| Move::new(from, from + dir.scaled(2)))
            .collect()
    }

    fn slides_from(board: &Board, from: Pos, piece: Piece) -> SmallVec<[Move; 4]> {
        piece
            .directions()
            .into_iter()
            .map(|dir| from + dir)
            .filter(|&to| board.contains(to) && board.get(to).is_none())
            .map(|to| Move::new(from, to))
            .collect()
    }
}

impl RulesEngine for Checkers {
    fn board_size(&self) -> usize {
        self.size
    }

    fn initial_board(&self) -> Board {
        Board::standard(self.size)
    }

    fn apply_move(
        &self,
        board: &Board,
        turn: Side,
        mv: Move,
        pending_capture: Option<Pos>,
    ) -> Result<MoveOutcome, MoveError> {
        let Move { from, to } = mv;
        if !turn.is_player() {
            return Err(MoveError::NoSideToMove);
        }
        for pos in [from, to] {
            if !board.contains(pos) {
                return Err(MoveError::OutOfBoard { pos });
            }
        }

        let piece = board.get(from).ok_or(MoveError::NoPiece { pos: from })?;
        if piece.side() != turn {
            return Err(MoveError::WrongTurn { pos: from, owner: piece.side(), turn });
        }
        if let Some(expected) = pending_capture {
            if expected != from {
                return Err(MoveError::WrongPieceContinuing { expected, found: from });
            }
        }
        if board.get(to).is_some() {
            return Err(MoveError::Occupied { pos: to });
        }
        if !Board::is_playable(to) {
            return Err(MoveError::Unplayable { pos: to });
        }

        let delta = from.delta(to);
        let distance = delta.x.abs();
        if distance != delta.y.abs() || !(1..=2).contains(&distance) {
            return Err(MoveError::InvalidDistance { from, to });
        }
        let dir = Pos::new(delta.x.signum(), delta.y.signum());
        if !piece.directions().contains(&dir) {
            return Err(MoveError::InvalidDirection { from, to });
        }

        let mut next = board.clone();
        let captured = if distance == 1 {
            if pending_capture.is_some() {
                return Err(MoveError::ContinuationMustCapture { pos: from });
            }
            if self.can_capture(board, turn) {
                return Err(MoveError::CaptureMandatory);
            }
            None
        } else {
            let over = from + dir;
            match board.get(over) {
                Some(p) if p.side() != turn => {}
                _ => return Err(MoveError::NothingToCapture { pos: over }),
            }
            next.set(over, None);
            Some(over)
        };
        next.set(from, None);
        next.set(to, Some(piece));

        // The piece keeps jumping as it was when the chain started.
        let must_continue = captured.is_some() && !Self::jumps_from(&next, to, piece).is_empty();
        let promoted = !must_continue && !piece.is_king() && to.y == next.king_row(turn);
        if promoted {
            next.set(to, Some(piece.crowned()));
        }

        Ok(MoveOutcome {
            board: next,
            captured,
            must_continue,
            promoted,
        })
    }

    fn legal_moves(&self, board: &Board, side: Side, pending_capture: Option<Pos>) -> Vec<Move> {
        if !side.is_player() {
            return Vec::new();
        }
        if let Some(pos) = pending_capture {
            return match board.get(pos) {
                Some(piece) if piece.side() == side => Self::jumps_from(board, pos, piece).to_vec(),
                _ => Vec::new(),
            };
        }

        let jumps: Vec<Move> = board
            .pieces_of(side)
            .flat_map(|(pos, piece)| Self::jumps_from(board, pos, piece))
            .collect();
        if !jumps.is_empty() {
            return jumps;
        }
        board
            .pieces_of(side)
            .flat_map(|(pos, piece)| Self::slides_from(board, pos, piece))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Checkers {
        Checkers::standard()
    }

    #[test]
    fn test_opening_moves() {
        let board = rules().initial_board();
        let moves = rules().legal_moves(&board, Side::Black, None);
        // Four front-row men, seven open diagonals.
        assert_eq!(moves.len(), 7);
        assert!(moves.contains(&Move::from_coords(1, 2, 2, 3)));
        assert!(moves.iter().all(|m| m.to.y == 3));
    }

    #[test]
    fn test_simple_step() {
        let board = rules().initial_board();
        let outcome = rules()
            .apply_move(&board, Side::Black, Move::from_coords(1, 2, 2, 3), None)
            .unwrap();

        assert_eq!(outcome.captured, None);
        assert!(!outcome.must_continue);
        assert!(!outcome.promoted);
        assert_eq!(outcome.board.get(Pos::new(1, 2)), None);
        assert_eq!(outcome.board.get(Pos::new(2, 3)), Some(Piece::BlackMan));
        // Input untouched.
        assert_eq!(board, rules().initial_board());
    }

    #[test]
    fn test_rejections_on_opening_board() {
        let board = rules().initial_board();
        let check = |mv: Move| rules().apply_move(&board, Side::Black, mv, None).unwrap_err();

        assert_eq!(
            check(Move::from_coords(1, 2, 2, 8)),
            MoveError::OutOfBoard { pos: Pos::new(2, 8) }
        );
        assert_eq!(
            check(Move::from_coords(0, 3, 1, 4)),
            MoveError::NoPiece { pos: Pos::new(0, 3) }
        );
        assert_eq!(
            check(Move::from_coords(0, 5, 1, 4)),
            MoveError::WrongTurn { pos: Pos::new(0, 5), owner: Side::Red, turn: Side::Black }
        );
        assert_eq!(
            check(Move::from_coords(0, 1, 1, 2)),
            MoveError::Occupied { pos: Pos::new(1, 2) }
        );
        assert_eq!(
            check(Move::from_coords(1, 2, 1, 3)),
            MoveError::Unplayable { pos: Pos::new(1, 3) }
        );
        assert_eq!(
            check(Move::from_coords(1, 2, 4, 3)),
            MoveError::InvalidDistance { from: Pos::new(1, 2), to: Pos::new(4, 3) }
        );
    }

    #[test]
    fn test_man_cannot_retreat() {
        let board = Board::empty(8).with(Pos::new(3, 4), Piece::BlackMan);
        assert_eq!(
            rules().apply_move(&board, Side::Black, Move::from_coords(3, 4, 2, 3), None),
            Err(MoveError::InvalidDirection { from: Pos::new(3, 4), to: Pos::new(2, 3) })
        );
    }

    #[test]
    fn test_king_moves_backwards() {
        let board = Board::empty(8).with(Pos::new(3, 4), Piece::BlackKing);
        let outcome = rules()
            .apply_move(&board, Side::Black, Move::from_coords(3, 4, 2, 3), None)
            .unwrap();
        assert_eq!(outcome.board.get(Pos::new(2, 3)), Some(Piece::BlackKing));
        assert!(!outcome.promoted);
    }

    #[test]
    fn test_jump_over_own_piece_rejected() {
        let board = Board::empty(8)
            .with(Pos::new(2, 3), Piece::BlackMan)
            .with(Pos::new(3, 4), Piece::BlackMan);
        assert_eq!(
            rules().apply_move(&board, Side::Black, Move::from_coords(2, 3, 4, 5), None),
            Err(MoveError::NothingToCapture { pos: Pos::new(3, 4) })
        );
    }

    #[test]
    fn test_no_side_to_move() {
        let board = rules().initial_board();
        assert_eq!(
            rules().apply_move(&board, Side::NoPlayer, Move::from_coords(1, 2, 2, 3), None),
            Err(MoveError::NoSideToMove)
        );
        assert!(rules().legal_moves(&board, Side::NoPlayer, None).is_empty());
    }

    #[test]
    fn test_can_capture() {
        let board = Board::empty(8)
            .with(Pos::new(2, 3), Piece::BlackMan)
            .with(Pos::new(3, 4), Piece::RedMan);
        assert!(rules().can_capture(&board, Side::Black));
        assert!(rules().can_capture(&board, Side::Red));

        let blocked = board.with(Pos::new(4, 5), Piece::RedMan);
        assert!(!rules().can_capture(&blocked, Side::Black));
    }
}
