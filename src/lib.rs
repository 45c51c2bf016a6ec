//! # rust-checkers
//!
//! A deterministic checkers state machine for replicated hosts, with a
//! deadline-ordered queue that forfeits abandoned games.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every operation is a pure function of the stored
//!    state, the message, and the block time the host passes in. No wall
//!    clock, no randomness, no hash-order iteration reaches the store.
//!
//! 2. **Atomic**: Operations stage writes in a `Transaction` and commit once.
//!    A rejected move or a corrupted queue leaves the store untouched.
//!
//! 3. **Bounded Expiry**: In-progress games form a doubly linked list
//!    ordered by last activity, so a sweep only visits games that actually
//!    expired.
//!
//! ## Modules
//!
//! - `core`: Game ids, sides, player addresses, configuration, clock
//! - `board`: Board, pieces, coordinates and the persisted text form
//! - `rules`: `RulesEngine` trait and the `Checkers` implementation
//! - `store`: `GameStore` trait, in-memory store, transactions
//! - `fifo`: Deadline queue over the store
//! - `game`: Game records, genesis, and the `Ledger` orchestrator
//! - `events`: Notifications emitted after each committed operation
//!
//! ## Example
//!
//! ```
//! use rust_checkers::{CheckersConfig, FixedClock, Clock, Ledger, Move, Side};
//!
//! let alice = "cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3";
//! let bob = "cosmos1xyxs3skf3f4jfqeuv89yyaqvjc6lffavxqhc8g";
//! let carol = "cosmos1e0w5t53nrq7p66fye6c8p0ynyhf6y24l4yuxd7";
//!
//! let clock = FixedClock::at_unix(1_000);
//! let mut ledger = Ledger::new(CheckersConfig::default()).unwrap();
//! let id = ledger.create_game(alice, bob, carol, clock.now()).unwrap();
//!
//! // Black (carol) opens.
//! let report = ledger.play_move(id, carol, Move::from_coords(1, 2, 2, 3), clock.now()).unwrap();
//! assert_eq!(report.turn, Side::Red);
//! assert_eq!(report.winner, Side::NoPlayer);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod store;
pub mod fifo;
pub mod game;
pub mod events;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    AddressValidator, BlockTime, CheckersConfig, Clock, FixedClock, GameId, PlayerAddress, PrefixValidator, Side,
    SystemClock,
};

pub use crate::board::{Board, NotationError, Piece, Pos};

pub use crate::rules::{Checkers, Move, MoveError, MoveOutcome, RulesEngine};

pub use crate::store::{GameStore, MemoryStore, Transaction};

pub use crate::game::{GameRecord, GameStatus, Genesis, Ledger, MoveCheck, MoveReport, QueueAnchor};

pub use crate::events::{EventSink, LedgerEvent};

pub use crate::error::CheckersError;
