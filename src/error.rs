//! Ledger errors.
//!
//! Every operation validates fully before it mutates anything, so any error
//! returned here means nothing was persisted.

use crate::board::NotationError;
use crate::core::{BlockTime, GameId, Side};
use crate::rules::MoveError;

/// Errors reported by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckersError {
    /// The move breaks a rule of the game.
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    /// The sender is a player of this game but the other side owes the move.
    #[error("not your turn: {expected} to play")]
    NotYourTurn { expected: Side },

    /// The sender plays neither side of this game.
    #[error("{player} is not a player in game {id}")]
    NotAPlayer { id: GameId, player: String },

    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("game {id} is already over, winner {winner}")]
    GameAlreadyOver { id: GameId, winner: Side },

    /// A player address failed validation.
    #[error("{role} address is invalid: {address}: {reason}")]
    InvalidPlayerIdentifier {
        role: &'static str,
        address: String,
        reason: String,
    },

    /// Persisted board text could not be parsed.
    #[error(transparent)]
    InvalidNotation(#[from] NotationError),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// `now` plus the timeout is past the last representable instant.
    #[error("deadline out of range: {now} plus {timeout_secs}s")]
    DeadlineOutOfRange { now: BlockTime, timeout_secs: i64 },

    /// The id counter cannot advance past the last id.
    #[error("game ids exhausted at {last}")]
    IdsExhausted { last: GameId },

    /// Queue links or the anchor disagree with the stored records.
    ///
    /// Fatal: the host should halt rather than skip the affected game.
    #[error("deadline queue corrupted: {reason}")]
    QueueCorrupted { reason: String },

    /// A persisted record or genesis entry is inconsistent.
    #[error("invalid game record {id}: {reason}")]
    InvalidRecord { id: GameId, reason: String },

    #[error("snapshot encoding failed")]
    Snapshot(#[from] bincode::Error),
}

impl CheckersError {
    pub(crate) fn corrupted(reason: impl Into<String>) -> Self {
        Self::QueueCorrupted { reason: reason.into() }
    }

    /// True for errors that indicate broken ledger state rather than a bad request.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::QueueCorrupted { .. } | Self::InvalidRecord { .. })
    }
}
