//! Persisted game state.
//!
//! ## GameRecord
//!
//! One per game, keyed by `GameId`. Carries the board and turn, the winner,
//! the deadline, and the two intrusive queue links (`before_id`/`after_id`)
//! that thread in-progress games into the deadline queue.
//!
//! ## QueueAnchor
//!
//! Singleton holding the id counter and the queue's head and tail.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos};
use crate::core::id::link;
use crate::core::{AddressValidator, BlockTime, GameId, PlayerAddress, Side};
use crate::error::CheckersError;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No winner yet; the game is in the deadline queue.
    InProgress,
    /// The opponent ran out of moves.
    Won(Side),
    /// The opponent missed its deadline.
    Forfeited(Side),
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Winning side, `NoPlayer` while in progress.
    #[must_use]
    pub const fn winner(self) -> Side {
        match self {
            GameStatus::InProgress => Side::NoPlayer,
            GameStatus::Won(side) | GameStatus::Forfeited(side) => side,
        }
    }
}

/// A persisted game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Store key.
    #[serde(rename = "index")]
    pub id: GameId,

    /// Account that created the game.
    pub creator: PlayerAddress,

    pub red: PlayerAddress,
    pub black: PlayerAddress,

    /// Current board, persisted in text form.
    #[serde(rename = "game")]
    pub board: Board,

    /// Side owing the next step.
    pub turn: Side,

    /// Completed moves; a capture chain counts once.
    pub move_count: u64,

    /// `NoPlayer` while in progress.
    pub winner: Side,

    /// The win came from a missed deadline.
    #[serde(default)]
    pub forfeited: bool,

    /// After this instant the game may be forfeited by `turn`.
    pub deadline: BlockTime,

    /// Previous game in the deadline queue (towards the head).
    #[serde(with = "link")]
    pub before_id: Option<GameId>,

    /// Next game in the deadline queue (towards the tail).
    #[serde(with = "link")]
    pub after_id: Option<GameId>,

    /// Square of a piece midway through a capture chain.
    ///
    /// While set, `turn` has not passed and only that piece may move.
    #[serde(default)]
    pub pending_capture: Option<Pos>,
}

impl GameRecord {
    /// A fresh, unlinked game.
    #[must_use]
    pub fn new(
        id: GameId,
        creator: PlayerAddress,
        red: PlayerAddress,
        black: PlayerAddress,
        board: Board,
        turn: Side,
        deadline: BlockTime,
    ) -> Self {
        Self {
            id,
            creator,
            red,
            black,
            board,
            turn,
            move_count: 0,
            winner: Side::NoPlayer,
            forfeited: false,
            deadline,
            before_id: None,
            after_id: None,
            pending_capture: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match (self.winner, self.forfeited) {
            (Side::NoPlayer, _) => GameStatus::InProgress,
            (side, true) => GameStatus::Forfeited(side),
            (side, false) => GameStatus::Won(side),
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_player()
    }

    /// True if neither queue link is set.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.before_id.is_none() && self.after_id.is_none()
    }

    /// Address playing `side`.
    #[must_use]
    pub fn address_of(&self, side: Side) -> Option<&PlayerAddress> {
        match side {
            Side::Red => Some(&self.red),
            Side::Black => Some(&self.black),
            Side::NoPlayer => None,
        }
    }

    /// Whether `deadline` has been reached at `now`.
    #[must_use]
    pub fn is_expired(&self, now: BlockTime) -> bool {
        self.deadline <= now
    }

    /// Check addresses and internal consistency.
    pub fn validate(&self, validator: &dyn AddressValidator) -> Result<(), CheckersError> {
        for (role, address) in [("creator", &self.creator), ("red", &self.red), ("black", &self.black)] {
            validate_address(validator, role, address.as_str())?;
        }
        let invalid = |reason: String| CheckersError::InvalidRecord { id: self.id, reason };
        if self.is_over() {
            if !self.is_detached() {
                return Err(invalid("finished game is still linked into the queue".to_string()));
            }
            if self.pending_capture.is_some() {
                return Err(invalid("finished game has a capture chain pending".to_string()));
            }
        } else if !self.turn.is_player() {
            return Err(invalid("game in progress has no side to move".to_string()));
        }
        if let Some(pos) = self.pending_capture {
            if self.board.get(pos).map(|p| p.side()) != Some(self.turn) {
                return Err(invalid(format!("no {} piece at pending capture square {}", self.turn, pos)));
            }
        }
        Ok(())
    }
}

/// Validate one address, naming its role in the error.
pub(crate) fn validate_address(
    validator: &dyn AddressValidator,
    role: &'static str,
    address: &str,
) -> Result<(), CheckersError> {
    validator
        .validate(address)
        .map_err(|reason| CheckersError::InvalidPlayerIdentifier {
            role,
            address: address.to_string(),
            reason,
        })
}

/// Singleton: id counter and deadline queue ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAnchor {
    /// Id handed to the next created game.
    #[serde(rename = "idValue")]
    pub next_id: GameId,

    /// Game with the oldest activity.
    #[serde(rename = "fifoHead", with = "link")]
    pub head: Option<GameId>,

    /// Game with the most recent activity.
    #[serde(rename = "fifoTail", with = "link")]
    pub tail: Option<GameId>,
}

impl Default for QueueAnchor {
    fn default() -> Self {
        Self {
            next_id: GameId::FIRST,
            head: None,
            tail: None,
        }
    }
}

impl QueueAnchor {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
